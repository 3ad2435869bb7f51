//! Dependency selection for the generated project.
//!
//! The bundled source manifest lists everything the template needs plus the
//! tooling the generator itself was built with. Only the former may leak into
//! a new project; [`installable_specifiers`] strips the latter.

use std::fmt;

/// Generator tooling that must never be installed into a scaffold.
pub const TOOLING_PACKAGES: &[&str] = &[
    "chalk",
    "commander",
    "fs-extra",
    "cz-conventional-changelog",
    "commitizen",
    "ora",
    "validate-npm-package-name",
    "boxen",
    "semantic-release",
];

/// Which dependency section of a manifest we are dealing with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

impl DependencyKind {
    /// Key of the section in `package.json`.
    pub const fn manifest_key(self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Dev => "devDependencies",
        }
    }

    /// Flag passed to `npm install` so the manifest records the section.
    pub const fn save_flag(self) -> &'static str {
        match self {
            Self::Runtime => "--save",
            Self::Dev => "--save-dev",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

/// Build `name@version` specifiers for every entry not in `blocklist`.
///
/// Source order is preserved. Pure: the input is only borrowed.
pub fn installable_specifiers<'a, I>(entries: I, blocklist: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .filter(|(name, _)| !blocklist.contains(name))
        .map(|(name, version)| format!("{name}@{version}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocklisted_entries_are_removed() {
        let deps = [("chalk", "^1.0.0"), ("react", "^16.0.0")];
        let specs = installable_specifiers(deps, &["chalk"]);
        assert_eq!(specs, vec!["react@^16.0.0"]);
    }

    #[test]
    fn source_order_is_preserved() {
        let deps = [
            ("styled-components", "^4.1.3"),
            ("ora", "^3.0.0"),
            ("@reach/router", "^1.2.1"),
            ("react", "^16.8.0"),
        ];
        let specs = installable_specifiers(deps, TOOLING_PACKAGES);
        assert_eq!(
            specs,
            vec![
                "styled-components@^4.1.3",
                "@reach/router@^1.2.1",
                "react@^16.8.0"
            ]
        );
    }

    #[test]
    fn empty_blocklist_keeps_everything() {
        let deps = vec![("a", "1"), ("b", "2")];
        assert_eq!(installable_specifiers(deps.iter().copied(), &[]), vec!["a@1", "b@2"]);
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn all_tooling_is_filtered() {
        let deps: Vec<(&str, &str)> = TOOLING_PACKAGES.iter().map(|n| (*n, "1.0.0")).collect();
        assert!(installable_specifiers(deps, TOOLING_PACKAGES).is_empty());
    }

    #[test]
    fn kind_flags() {
        assert_eq!(DependencyKind::Runtime.save_flag(), "--save");
        assert_eq!(DependencyKind::Dev.save_flag(), "--save-dev");
        assert_eq!(DependencyKind::Dev.to_string(), "devDependencies");
    }
}
