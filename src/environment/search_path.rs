//! Ordered, duplicate-free list of search directories.

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the variable holding the search path.
const PATH_VAR: &str = "PATH";

/// The directories scanned for executables, in priority order.
///
/// Reading tolerates anything: empty items and duplicates are dropped, and
/// relative entries are kept but never scanned. The mutation methods are
/// strict and only accept absolute paths.
///
/// # Example
///
/// ```rust
/// use executable_discovery::SearchPath;
///
/// let mut search_path = SearchPath::new(["/usr/local/bin", "/usr/bin", "/usr/local/bin"]);
/// assert_eq!(search_path.len(), 2);
///
/// search_path.add(["/opt/tool/bin"]).unwrap();
/// assert!(search_path.add(["relative/bin"]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build from already-split entries.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut search_path = Self::default();
        for dir in dirs {
            search_path.push(dir.into());
        }
        search_path
    }

    /// Capture `PATH` from the process environment.
    ///
    /// An unset variable is an empty search path.
    pub fn from_env() -> Self {
        std::env::var_os(PATH_VAR)
            .map(|value| Self::new(std::env::split_paths(&value)))
            .unwrap_or_default()
    }

    /// Directories in priority order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Iterate over the directories in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.dirs.iter()
    }

    /// Number of directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Whether no directory is listed.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Append absolute directories, skipping those already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] if any value is relative; nothing is
    /// added in that case.
    pub fn add<I, P>(&mut self, dirs: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for dir in require_absolute(dirs)? {
            self.push(dir);
        }
        Ok(())
    }

    /// Remove directories, returning whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] if any value is relative.
    pub fn remove<I, P>(&mut self, dirs: I) -> Result<bool>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let targets = require_absolute(dirs)?;
        let before = self.dirs.len();
        self.dirs.retain(|dir| !targets.contains(dir));
        Ok(self.dirs.len() != before)
    }

    /// Encode back into a single `PATH`-style value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JoinPaths`] if a directory contains the delimiter.
    pub fn to_env_value(&self) -> Result<OsString> {
        Ok(std::env::join_paths(&self.dirs)?)
    }

    fn push(&mut self, dir: PathBuf) {
        if dir.as_os_str().is_empty() || self.dirs.contains(&dir) {
            return;
        }
        self.dirs.push(dir);
    }
}

impl<'a> IntoIterator for &'a SearchPath {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn require_absolute<I, P>(dirs: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    dirs.into_iter()
        .map(Into::into)
        .map(|dir: PathBuf| {
            if Path::is_absolute(&dir) {
                Ok(dir)
            } else {
                Err(Error::RelativePath { path: dir })
            }
        })
        .collect()
}
