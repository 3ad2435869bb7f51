//! Implementation of `sprout <project-directory>`.
//!
//! Responsibility: turn arguments and config into a scaffold request, wire
//! the adapters into the core service, and display results. No business
//! logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use sprout_adapters::{LocalFilesystem, SystemProcessRunner};
use sprout_core::{
    application::{
        PackageManager, ScaffoldReport, ScaffoldRequest, ScaffoldService, ScaffoldSettings,
        ports::Filesystem,
    },
    domain::{ManifestPatch, ProjectName, TemplateBundle, jest_block},
    error::SproutError,
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the scaffold.
///
/// Dispatch sequence:
/// 1. Validate the project name (nothing touches the disk before this)
/// 2. Resolve the absolute project root
/// 3. Decide whether an existing directory may be reused
/// 4. Run `ScaffoldService` with the system adapters
/// 5. Print the summary box
#[instrument(skip_all, fields(project = args.project_directory.as_deref().unwrap_or("")))]
pub fn execute(args: &Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    // 1. Validate
    let name =
        ProjectName::parse(args.project_directory.as_deref()).map_err(SproutError::from)?;

    // 2. Resolve root
    let root = std::env::current_dir()
        .with_cli_context(|| "Failed to read the current directory")?
        .join(name.as_str());
    debug!(root = %root.display(), "Project root resolved");

    // 3. Existing directory
    let filesystem = LocalFilesystem::new();
    let allow_existing = args.force || confirm_reuse(&filesystem, &root, output)?;

    // 4. Scaffold
    let bundle = config
        .template_dir()
        .with_cli_context(|| "Failed to unpack the bundled template")?;
    let settings = build_settings(args, config, bundle, allow_existing);
    debug!(
        package_manager = settings.package_manager.program(),
        template = %settings.bundle.root().display(),
        inline_jest = settings.patch.has_block("jest"),
        "Settings resolved"
    );

    output.creating(&root.display().to_string())?;
    output.print("")?;

    let service = ScaffoldService::new(
        Box::new(SystemProcessRunner::new()),
        Box::new(filesystem),
        Box::new(output.progress()),
        settings,
    );
    let report = service.scaffold(&ScaffoldRequest::new(name, root))?;
    info!(
        dependencies = report.dependencies.len(),
        dev_dependencies = report.dev_dependencies.len(),
        "Project created"
    );

    // 5. Summary
    output.print("")?;
    output.boxed(&summary_lines(&report))?;
    Ok(())
}

/// Combine config, flags and the reuse decision into service settings.
fn build_settings(
    args: &Cli,
    config: &AppConfig,
    bundle: PathBuf,
    allow_existing: bool,
) -> ScaffoldSettings {
    let program = args
        .package_manager
        .clone()
        .unwrap_or_else(|| config.package_manager.program.clone());

    let mut patch = ManifestPatch::standard();
    if config.template.inline_jest {
        patch = patch.with_block("jest", jest_block());
    }

    ScaffoldSettings {
        package_manager: PackageManager::new(program),
        bundle: TemplateBundle::new(bundle),
        patch,
        allow_existing,
    }
}

/// Ask before reusing a non-empty directory.
///
/// Returns `false` without asking when there is nothing to reuse or no one
/// to ask; the service then refuses a non-empty target itself.
fn confirm_reuse(fs: &dyn Filesystem, root: &Path, output: &OutputManager) -> CliResult<bool> {
    if !fs.exists(root) || fs.is_empty_dir(root)? {
        return Ok(false);
    }
    if !output.is_interactive() {
        return Ok(false);
    }
    prompt_reuse(root, output)
}

#[cfg(feature = "interactive")]
fn prompt_reuse(root: &Path, output: &OutputManager) -> CliResult<bool> {
    let accepted = dialoguer::Confirm::new()
        .with_prompt(format!(
            "{} already exists and is not empty. Scaffold into it anyway?",
            root.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })?;

    if !accepted {
        return Err(CliError::Cancelled);
    }
    output.warning("The directory will be removed if scaffolding fails")?;
    Ok(true)
}

#[cfg(not(feature = "interactive"))]
fn prompt_reuse(_root: &Path, _output: &OutputManager) -> CliResult<bool> {
    Ok(false)
}

fn summary_lines(report: &ScaffoldReport) -> Vec<String> {
    let name = report.name.as_str();
    vec![
        format!("Your react application {name} is ready to go!"),
        format!("To start coding the app run: cd {name}"),
        "To start executing the application run: npm run start".into(),
        "To start executing the application tests run: npm run test".into(),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
