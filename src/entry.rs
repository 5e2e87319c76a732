//! The resolved executable type.

use crate::rule::ExecutableRule;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// An executable found on the search path.
///
/// # Example
///
/// ```rust,no_run
/// use executable_discovery::{resolve_first, ResolveOptions};
///
/// if let Some(git) = resolve_first("git", &ResolveOptions::default()).unwrap() {
///     // On Windows: basename "git.exe", name "git".
///     println!("{} ({}) at {}", git.name, git.basename, git.path.display());
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutableEntry {
    /// File name as listed in its directory, e.g. `git.exe`.
    pub basename: String,

    /// File name without its executable extension, e.g. `git`.
    ///
    /// Identical to `basename` on POSIX hosts.
    pub name: String,

    /// Search directory joined with `basename`.
    pub path: PathBuf,
}

impl ExecutableEntry {
    /// Build the entry for a directory member the rule accepted.
    pub(crate) fn accepted(rule: &dyn ExecutableRule, file_name: &OsStr, path: PathBuf) -> Self {
        let basename = file_name.to_string_lossy().into_owned();
        let name = rule.derive_name(&basename).to_string();
        Self {
            basename,
            name,
            path,
        }
    }

    /// Directory the executable was found in.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

impl fmt::Display for ExecutableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtensionList, PosixRule, WindowsRule};

    #[test]
    fn test_accepted_on_windows_strips_extension() {
        let rule = WindowsRule::new(&ExtensionList::default());
        let path = PathBuf::from("/tools/git.exe");
        let entry = ExecutableEntry::accepted(&rule, OsStr::new("git.exe"), path.clone());

        assert_eq!(entry.basename, "git.exe");
        assert_eq!(entry.name, "git");
        assert_eq!(entry.path, path);
        assert_eq!(entry.dir(), Some(Path::new("/tools")));
    }

    #[test]
    fn test_accepted_on_posix_keeps_basename() {
        let rule = PosixRule::new(1000, 1000);
        let entry =
            ExecutableEntry::accepted(&rule, OsStr::new("run.sh"), PathBuf::from("/bin/run.sh"));
        assert_eq!(entry.name, "run.sh");
        assert_eq!(entry.basename, "run.sh");
    }

    #[test]
    fn test_display_is_path() {
        let entry = ExecutableEntry {
            basename: "ls".to_string(),
            name: "ls".to_string(),
            path: PathBuf::from("/bin/ls"),
        };
        assert_eq!(entry.to_string(), "/bin/ls");
    }

    #[test]
    fn test_serialized_shape() {
        let entry = ExecutableEntry {
            basename: "git.exe".to_string(),
            name: "git".to_string(),
            path: PathBuf::from("/tools/git.exe"),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "basename": "git.exe",
                "name": "git",
                "path": "/tools/git.exe",
            })
        );
        let back: ExecutableEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
