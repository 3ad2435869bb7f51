//! Project name value object and npm package-name rules.
//!
//! The directory the user asks for doubles as the `name` field of the
//! generated `package.json`, so it has to satisfy the same rules npm applies
//! to new packages. [`check_package_name`] reports every violation;
//! [`ProjectName::parse`] turns that report into a typed, validated name.
//!
//! A [`ProjectName`] cannot be built any other way, which is what guarantees
//! that no filesystem work starts before validation has passed.

use std::fmt;

use crate::domain::error::DomainError;

/// Names that collide with the packages the template itself depends on.
///
/// Sorted; matched exactly and case-sensitively.
pub const RESERVED_NAMES: &[&str] = &["react", "react-dom", "react-scripts"];

/// Names npm refuses outright.
const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node core modules; a package may not shadow one of these.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

const MAX_NAME_LENGTH: usize = 214;

// ── NameReport ────────────────────────────────────────────────────────────────

/// Outcome of checking a candidate name against npm's naming rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl NameReport {
    /// Usable as the name of a freshly published package.
    pub fn valid_for_new_packages(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Accepted for legacy packages (warnings tolerated).
    pub fn valid_for_old_packages(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `name` against npm's package naming rules.
pub fn check_package_name(name: &str) -> NameReport {
    let mut report = NameReport::default();

    if name.is_empty() {
        report
            .errors
            .push("name length must be greater than zero".into());
    }
    if name.starts_with('.') {
        report.errors.push("name cannot start with a period".into());
    }
    if name.starts_with('_') {
        report
            .errors
            .push("name cannot start with an underscore".into());
    }
    if name.trim() != name {
        report
            .errors
            .push("name cannot contain leading or trailing spaces".into());
    }

    let lower = name.to_lowercase();
    if BLACKLISTED_NAMES.contains(&lower.as_str()) {
        report.errors.push(format!("{name} is a blacklisted name"));
    }

    if NODE_BUILTINS.contains(&lower.as_str()) {
        report.warnings.push(format!("{name} is a core module name"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        report.warnings.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }
    if lower != name {
        report
            .warnings
            .push("name can no longer contain capital letters".into());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(['~', '\'', '!', '(', ')', '*']) {
        report.warnings.push(
            "name can no longer contain special characters (\"~'!()*\")".into(),
        );
    }

    if !is_url_safe(name) && !is_url_safe_scoped(name) {
        report
            .errors
            .push("name can only contain URL-friendly characters".into());
    }

    report
}

/// `true` when URI-component encoding would leave `s` untouched.
fn is_url_safe(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
    })
}

/// `@scope/name` where both halves are URL-safe on their own.
fn is_url_safe_scoped(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('@') else {
        return false;
    };
    match rest.split_once('/') {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && !package.contains('/')
                && is_url_safe(scope)
                && is_url_safe(package)
        }
        None => false,
    }
}

// ── ProjectName ───────────────────────────────────────────────────────────────

/// A project name that passed every naming check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate a (possibly absent) command-line argument.
    ///
    /// Checks run in order: presence, npm naming rules, reserved names.
    pub fn parse(candidate: Option<&str>) -> Result<Self, DomainError> {
        let name = candidate.ok_or(DomainError::MissingProjectName)?;

        let report = check_package_name(name);
        if !report.valid_for_new_packages() {
            return Err(DomainError::InvalidProjectName {
                name: name.to_owned(),
                errors: report.errors,
                warnings: report.warnings,
            });
        }

        if RESERVED_NAMES.binary_search(&name).is_ok() {
            return Err(DomainError::ReservedProjectName {
                name: name.to_owned(),
                reserved: RESERVED_NAMES.to_vec(),
            });
        }

        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
