//! Permission-bit executability on POSIX hosts.

use super::{ExecutableRule, FileStatus};
use crate::{Error, Result};
use std::path::Path;

const USER_EXECUTE: u32 = 0o100;
const GROUP_EXECUTE: u32 = 0o010;
const OTHERS_EXECUTE: u32 = 0o001;

const SUPERUSER: u32 = 0;

/// Executability from mode bits and ownership, evaluated for one identity.
///
/// A regular file is executable when any of these holds:
///
/// 1. others-execute is set
/// 2. group-execute is set and the file's group is the identity's group
/// 3. user-execute is set and the file's owner is the identity's user
/// 4. group- or user-execute is set and the identity is the superuser
///
/// # Example
///
/// ```rust
/// use executable_discovery::{ExecutableRule, FileStatus, PosixRule};
/// use std::path::Path;
///
/// let rule = PosixRule::new(1000, 1000);
/// let status = FileStatus {
///     is_file: true,
///     mode: Some(0o100744),
///     uid: Some(1000),
///     gid: Some(1000),
/// };
/// assert!(rule.is_executable(Path::new("/home/me/bin/tool"), &status).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosixRule {
    uid: u32,
    gid: u32,
}

impl PosixRule {
    /// Evaluate for an explicit user and group id.
    pub fn new(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// Evaluate for the effective identity of the current process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedIdentity`] when the host has no POSIX
    /// identity to report.
    pub fn from_process() -> Result<Self> {
        Self::with_overrides(None, None)
    }

    /// Evaluate for `uid`/`gid`, falling back to the process identity for
    /// whichever is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedIdentity`] when a fallback is needed and
    /// unavailable.
    pub fn with_overrides(uid: Option<u32>, gid: Option<u32>) -> Result<Self> {
        let gid = gid
            .or_else(identity::effective_gid)
            .ok_or(Error::UnresolvedIdentity { id: "group" })?;
        let uid = uid
            .or_else(identity::effective_uid)
            .ok_or(Error::UnresolvedIdentity { id: "user" })?;
        Ok(Self { uid, gid })
    }

    /// User id the rule evaluates for.
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// Group id the rule evaluates for.
    pub fn gid(&self) -> u32 {
        self.gid
    }
}

impl ExecutableRule for PosixRule {
    fn is_executable(&self, path: &Path, status: &FileStatus) -> Result<bool> {
        if !status.is_file {
            return Ok(false);
        }

        let missing = |field| Error::MissingFileStatus {
            path: path.to_path_buf(),
            field,
        };
        let file_gid = status.gid.ok_or_else(|| missing("group ID"))?;
        let mode = status.mode.ok_or_else(|| missing("mode"))?;
        let file_uid = status.uid.ok_or_else(|| missing("user ID"))?;

        Ok(mode & OTHERS_EXECUTE != 0
            || (mode & GROUP_EXECUTE != 0 && file_gid == self.gid)
            || (mode & USER_EXECUTE != 0 && file_uid == self.uid)
            || (mode & (USER_EXECUTE | GROUP_EXECUTE) != 0 && self.uid == SUPERUSER))
    }
}

mod identity {
    #[cfg(unix)]
    pub(super) fn effective_uid() -> Option<u32> {
        Some(nix::unistd::geteuid().as_raw())
    }

    #[cfg(unix)]
    pub(super) fn effective_gid() -> Option<u32> {
        Some(nix::unistd::getegid().as_raw())
    }

    #[cfg(not(unix))]
    pub(super) fn effective_uid() -> Option<u32> {
        None
    }

    #[cfg(not(unix))]
    pub(super) fn effective_gid() -> Option<u32> {
        None
    }
}
