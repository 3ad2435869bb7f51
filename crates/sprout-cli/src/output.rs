//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::sync::Mutex;
use std::time::Duration;

use console::{Term, measure_text_width};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use sprout_core::application::ports::ProgressReporter;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    interactive: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.color_disabled() || config.output.no_color,
            interactive: io::stdout().is_terminal() && io::stderr().is_terminal(),
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// `Creating a new React app in <root>.` with the path highlighted.
    pub fn creating(&self, root: &str) -> io::Result<()> {
        let root = if self.no_color {
            root.to_owned()
        } else {
            root.green().to_string()
        };
        self.print(&format!("Creating a new React app in {root}."))
    }

    /// Framed block of centred lines; the first line is the headline.
    pub fn boxed(&self, lines: &[String]) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        for line in render_box(lines, self.no_color) {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Progress reporter matching this manager's settings.
    ///
    /// Animated when both streams are terminals; plain lines otherwise.
    pub fn progress(&self) -> TerminalProgress {
        TerminalProgress {
            term: self.term.clone(),
            quiet: self.quiet,
            no_color: self.no_color,
            animate: self.interactive && !self.quiet,
            spinner: Mutex::new(None),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` when the user can answer prompts.
    pub fn is_interactive(&self) -> bool {
        self.interactive && io::stdin().is_terminal()
    }
}

fn success_line(msg: &str, no_color: bool) -> String {
    if no_color {
        format!("\u{2713} {msg}") // ✓
    } else {
        format!("{} {}", "\u{2713}".green().bold(), msg.green())
    }
}

fn render_box(lines: &[String], no_color: bool) -> Vec<String> {
    const PADDING: usize = 3;
    let width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + PADDING * 2;

    let blank = format!("\u{2502}{}\u{2502}", " ".repeat(width));
    let mut out = vec![format!("\u{2552}{}\u{2555}", "\u{2550}".repeat(width)), blank.clone()];
    for (i, line) in lines.iter().enumerate() {
        let gap = width - measure_text_width(line);
        let left = gap / 2;
        let text = if i == 0 && !no_color {
            line.green().bold().to_string()
        } else {
            line.clone()
        };
        out.push(format!(
            "\u{2502}{}{}{}\u{2502}",
            " ".repeat(left),
            text,
            " ".repeat(gap - left)
        ));
    }
    out.push(blank);
    out.push(format!("\u{2558}{}\u{255b}", "\u{2550}".repeat(width)));
    out
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Terminal-backed [`ProgressReporter`]: a spinner per step, a mark per
/// outcome.
pub struct TerminalProgress {
    term: Term,
    quiet: bool,
    no_color: bool,
    animate: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn line(&self, line: &str) {
        // Write errors are ignored.
        let _ = self.term.write_line(line);
    }
}

impl ProgressReporter for TerminalProgress {
    fn start(&self, message: &str) {
        self.stop_spinner();
        if self.quiet {
            return;
        }
        if !self.animate {
            self.line(&format!("- {message}"));
            return;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars("\u{2801}\u{2802}\u{2804}\u{2840}\u{2880}\u{2820}\u{2810}\u{2808} "));
        }
        bar.set_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(bar);
        }
    }

    fn succeed(&self, message: &str) {
        self.stop_spinner();
        if !self.quiet {
            self.line(&success_line(message, self.no_color));
        }
    }

    fn info(&self, message: &str) {
        self.stop_spinner();
        if self.quiet {
            return;
        }
        let line = if self.no_color {
            format!("\u{2139} {message}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), message.blue())
        };
        self.line(&line);
    }

    /// Not suppressed in quiet mode.
    fn fail(&self, message: &str) {
        self.stop_spinner();
        let line = if self.no_color {
            format!("\u{2717} {message}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), message.red())
        };
        let _ = Term::stderr().write_line(&line);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.quiet);
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn box_lines_share_a_width() {
        let lines = vec![
            "Your react application demo is ready to go!".to_string(),
            "cd demo".to_string(),
        ];
        let rendered = render_box(&lines, true);
        assert_eq!(rendered.len(), lines.len() + 4);
        let width = measure_text_width(&rendered[0]);
        assert!(rendered.iter().all(|l| measure_text_width(l) == width));
        assert!(rendered[2].contains("ready to go!"));
    }

    #[test]
    fn plain_progress_never_panics() {
        let progress = make_manager(false, true).progress();
        progress.start("Initializing package with npm");
        progress.succeed("npm init ran successfully");
        progress.info("Initializing installation of dependencies");
        progress.fail("Welp something broke");
    }
}
