//! Resolution and executability-check options.
//!
//! This module provides [`ResolveOptions`] for configuring a resolution call
//! (working-directory injection and entry filters) and
//! [`IsExecutableOptions`] for single-path checks.

use crate::{ExecutableEntry, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether the working directory is searched before the search path.
///
/// Default: [`CwdMode::Exclude`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CwdMode {
    /// Search only the search path.
    #[default]
    Exclude,
    /// Prepend the process's current working directory.
    Current,
    /// Prepend this directory.
    Dir(PathBuf),
}

impl From<bool> for CwdMode {
    fn from(include: bool) -> Self {
        if include {
            Self::Current
        } else {
            Self::Exclude
        }
    }
}

impl From<PathBuf> for CwdMode {
    fn from(dir: PathBuf) -> Self {
        Self::Dir(dir)
    }
}

/// Accepts an entry by its basename, derived name, or path.
///
/// # Example
///
/// ```rust
/// use executable_discovery::Filter;
///
/// let exact = Filter::exact("git");
/// let prefix = Filter::pattern("^git").unwrap();
/// ```
#[derive(Debug, Clone)]
pub enum Filter {
    /// String equality with any of the three targets.
    Exact(String),
    /// Regex match against any of the three targets.
    Pattern(Regex),
}

impl Filter {
    /// Match one of the targets exactly.
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into())
    }

    /// Compile a pattern filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) if
    /// `pattern` is not a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Whether `entry` satisfies this filter.
    pub fn matches(&self, entry: &ExecutableEntry) -> bool {
        let path = entry.path.to_string_lossy();
        let targets = [entry.basename.as_str(), entry.name.as_str(), path.as_ref()];
        match self {
            Self::Exact(value) => targets.contains(&value.as_str()),
            Self::Pattern(regex) => targets.iter().any(|target| regex.is_match(target)),
        }
    }

    /// Whether `entry` passes a filter set; an empty set accepts everything.
    pub(crate) fn any_matches(filters: &[Filter], entry: &ExecutableEntry) -> bool {
        filters.is_empty() || filters.iter().any(|filter| filter.matches(entry))
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self::exact(value)
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Self::Exact(value)
    }
}

impl From<Regex> for Filter {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

/// Options for one resolution call.
///
/// # Example
///
/// ```rust
/// use executable_discovery::{CwdMode, Filter, ResolveOptions};
///
/// // Every executable on the search path
/// let opts = ResolveOptions::default();
///
/// // Executables named like `cargo-*`, working directory first
/// let opts = ResolveOptions {
///     cwd: CwdMode::Current,
///     filters: vec![Filter::pattern("^cargo-").unwrap()],
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Working-directory injection.
    ///
    /// Default: [`CwdMode::Exclude`]
    pub cwd: CwdMode,

    /// An entry is yielded if it satisfies any filter.
    ///
    /// Default: empty, which accepts every entry.
    pub filters: Vec<Filter>,
}

/// Options for [`is_executable`](crate::is_executable).
///
/// Deserializes from partial input; absent fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsExecutableOptions {
    /// Return `false` instead of an error when the path does not exist.
    ///
    /// Default: `false`
    pub may_not_exist: bool,

    /// Group id for the POSIX permission check.
    ///
    /// Default: the effective group id of the process.
    pub gid: Option<u32>,

    /// User id for the POSIX permission check.
    ///
    /// Default: the effective user id of the process.
    pub uid: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(basename: &str, name: &str, path: &str) -> ExecutableEntry {
        ExecutableEntry {
            basename: basename.to_string(),
            name: name.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_default_cwd_mode() {
        let opts = ResolveOptions::default();
        assert_eq!(opts.cwd, CwdMode::Exclude);
        assert!(opts.filters.is_empty());
    }

    #[test]
    fn test_cwd_mode_conversions() {
        assert_eq!(CwdMode::from(false), CwdMode::Exclude);
        assert_eq!(CwdMode::from(true), CwdMode::Current);
        assert_eq!(
            CwdMode::from(PathBuf::from("/work")),
            CwdMode::Dir(PathBuf::from("/work"))
        );
    }

    #[test]
    fn test_exact_filter_targets() {
        let git = entry("git.exe", "git", "/tools/git.exe");
        assert!(Filter::exact("git").matches(&git));
        assert!(Filter::exact("git.exe").matches(&git));
        assert!(Filter::exact("/tools/git.exe").matches(&git));
        assert!(!Filter::exact("gi").matches(&git));
    }

    #[test]
    fn test_pattern_filter_anchoring() {
        let filter = Filter::pattern("^git").unwrap();
        assert!(filter.matches(&entry("git-lfs", "git-lfs", "/tools/git-lfs")));
        assert!(!filter.matches(&entry("mygit", "mygit", "/tools/mygit")));
    }

    #[test]
    fn test_invalid_pattern() {
        let error = Filter::pattern("(unclosed").unwrap_err();
        assert!(error.is_configuration());
    }

    #[test]
    fn test_empty_filter_set_accepts_all() {
        assert!(Filter::any_matches(&[], &entry("anything", "anything", "/x/anything")));
    }

    #[test]
    fn test_any_filter_accepts() {
        let filters = vec!["ls".into(), Filter::pattern("^git").unwrap()];
        assert!(Filter::any_matches(&filters, &entry("ls", "ls", "/bin/ls")));
        assert!(Filter::any_matches(&filters, &entry("gitk", "gitk", "/bin/gitk")));
        assert!(!Filter::any_matches(&filters, &entry("cat", "cat", "/bin/cat")));
    }

    #[test]
    fn test_is_executable_options_default() {
        let opts = IsExecutableOptions::default();
        assert!(!opts.may_not_exist);
        assert!(opts.gid.is_none());
        assert!(opts.uid.is_none());
    }

    #[test]
    fn test_is_executable_options_partial_deserialize() {
        let opts: IsExecutableOptions = serde_json::from_str(r#"{"uid": 0}"#).unwrap();
        assert_eq!(
            opts,
            IsExecutableOptions {
                uid: Some(0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_cwd_mode_serde() {
        let json = serde_json::to_string(&CwdMode::Dir(PathBuf::from("/work"))).unwrap();
        assert_eq!(json, r#"{"dir":"/work"}"#);
        let mode: CwdMode = serde_json::from_str(r#""current""#).unwrap();
        assert_eq!(mode, CwdMode::Current);
    }
}
