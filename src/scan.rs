//! Single-directory scanning.
//!
//! Listing errors are classified once here for both the blocking and the
//! non-blocking engine: a directory that is missing, is not a directory, or
//! cannot be read is skipped, anything else aborts the resolution.
//! Per-entry failures never abort.

use crate::rule::{self, ExecutableRule};
use crate::{Error, ExecutableEntry, Result};
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Blocking scan of one search directory.
///
/// Owns the open directory handle; dropping the scan closes it.
#[derive(Debug)]
pub(crate) struct DirScan {
    dir: PathBuf,
    entries: fs::ReadDir,
}

impl DirScan {
    /// Open `dir`, or `Ok(None)` if it is skipped.
    pub(crate) fn open(dir: PathBuf) -> Result<Option<Self>> {
        trace!(dir = %dir.display(), "scanning search directory");
        match fs::read_dir(&dir) {
            Ok(entries) => Ok(Some(Self { dir, entries })),
            Err(error) => skip_directory(&dir, error).map(|()| None),
        }
    }

    /// The next member the rule accepts, in listing order.
    ///
    /// `Ok(None)` once the directory is exhausted or its listing failed in a
    /// skippable way.
    pub(crate) fn next_candidate(
        &mut self,
        rule: &dyn ExecutableRule,
    ) -> Result<Option<ExecutableEntry>> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    skip_directory(&self.dir, error)?;
                    return Ok(None);
                }
            };
            let path = entry.path();
            let metadata = fs::metadata(&path);
            if let Some(candidate) = classify(rule, &entry.file_name(), path, metadata) {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

/// Open `dir` without blocking, or `Ok(None)` if it is skipped.
pub(crate) async fn open_async(dir: &Path) -> Result<Option<tokio::fs::ReadDir>> {
    trace!(dir = %dir.display(), "scanning search directory");
    match tokio::fs::read_dir(dir).await {
        Ok(entries) => Ok(Some(entries)),
        Err(error) => skip_directory(dir, error).map(|()| None),
    }
}

/// Decide whether a listing error skips `dir` or aborts the resolution.
pub(crate) fn skip_directory(dir: &Path, error: io::Error) -> Result<()> {
    match error.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            debug!(dir = %dir.display(), %error, "skipping search directory");
            Ok(())
        }
        io::ErrorKind::PermissionDenied => {
            warn!(dir = %dir.display(), %error, "search directory is not readable, skipping");
            Ok(())
        }
        _ => Err(Error::io(dir, error)),
    }
}

/// Turn one directory member into a candidate if the rule accepts it.
///
/// Members that vanished or whose check failed are skipped.
pub(crate) fn classify(
    rule: &dyn ExecutableRule,
    file_name: &OsStr,
    path: PathBuf,
    metadata: io::Result<Metadata>,
) -> Option<ExecutableEntry> {
    match rule::apply(rule, &path, metadata, true) {
        Ok(true) => Some(ExecutableEntry::accepted(rule, file_name, path)),
        Ok(false) => None,
        Err(error) => {
            trace!(path = %path.display(), %error, "skipping entry");
            None
        }
    }
}
