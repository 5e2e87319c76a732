//! Extension-based executability on Windows hosts.

use super::{ExecutableRule, FileStatus};
use crate::{ExtensionList, Result};
use std::path::Path;

/// Executability from the file name's suffix.
///
/// A regular file is executable when its name ends with one of the effective
/// extensions, compared case-insensitively, and is longer than that
/// extension: a file named just `.exe` does not qualify.
///
/// # Example
///
/// ```rust
/// use executable_discovery::{ExecutableRule, ExtensionList, FileStatus, WindowsRule};
/// use std::path::Path;
///
/// let rule = WindowsRule::new(&ExtensionList::new([".EXE", ".BAT"]));
/// let status = FileStatus { is_file: true, ..Default::default() };
///
/// assert!(rule.is_executable(Path::new(r"C:\Tools\Tool.EXE"), &status).unwrap());
/// assert_eq!(rule.derive_name("Tool.EXE"), "Tool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsRule {
    extensions: Vec<String>,
}

impl WindowsRule {
    /// Snapshot the effective suffixes of `extensions`.
    pub fn new(extensions: &ExtensionList) -> Self {
        Self {
            extensions: extensions
                .effective()
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
        }
    }

    /// The suffixes in effect, lower-cased.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn matched_extension(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.extensions
            .iter()
            .find(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
            .map(String::as_str)
    }
}

impl ExecutableRule for WindowsRule {
    fn is_executable(&self, path: &Path, status: &FileStatus) -> Result<bool> {
        if !status.is_file {
            return Ok(false);
        }
        let Some(name) = path.file_name() else {
            return Ok(false);
        };
        Ok(self.matched_extension(&name.to_string_lossy()).is_some())
    }

    fn derive_name<'a>(&self, basename: &'a str) -> &'a str {
        match self.matched_extension(basename) {
            Some(ext) => &basename[..basename.len() - ext.len()],
            None => basename,
        }
    }
}
