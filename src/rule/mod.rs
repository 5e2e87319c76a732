//! Executability predicate.
//!
//! A rule decides from a [`FileStatus`] whether a path is executable:
//!
//! - [`PosixRule`]: permission bits against the effective user and group
//! - [`WindowsRule`]: file-name suffix against the `PATHEXT` list
//!
//! [`is_executable`] and [`is_executable_async`] perform the status lookup
//! themselves and apply the rule of the current [`Platform`](crate::Platform).

mod posix;
mod status;
mod windows;

pub use posix::PosixRule;
pub use status::FileStatus;
pub use windows::WindowsRule;

use crate::{Error, ExtensionList, IsExecutableOptions, Platform, Result};
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::path::Path;

/// A platform's definition of "executable".
///
/// Implementations are pure: they never touch the filesystem, so the same
/// rule serves blocking and non-blocking resolution alike.
pub trait ExecutableRule: fmt::Debug + Send + Sync {
    /// Decide whether `path`, whose status is `status`, is executable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFileStatus`] when `status` lacks a field the
    /// rule depends on.
    fn is_executable(&self, path: &Path, status: &FileStatus) -> Result<bool>;

    /// The name of an accepted entry with any recognized suffix removed.
    fn derive_name<'a>(&self, basename: &'a str) -> &'a str {
        basename
    }
}

/// Determine whether `path` is executable on the current platform.
///
/// The status lookup follows symlinks.
///
/// # Errors
///
/// - [`Error::Io`] if the status lookup fails (a missing path is
///   `Ok(false)` instead when `options.may_not_exist` is set)
/// - [`Error::UnresolvedIdentity`] if the POSIX identity is unavailable
/// - [`Error::MissingFileStatus`] if the status is incomplete
///
/// # Example
///
/// ```rust
/// use executable_discovery::{is_executable, IsExecutableOptions};
///
/// let options = IsExecutableOptions {
///     may_not_exist: true,
///     ..Default::default()
/// };
/// assert!(!is_executable("/no/such/tool", &options).unwrap());
/// ```
pub fn is_executable(path: impl AsRef<Path>, options: &IsExecutableOptions) -> Result<bool> {
    let path = path.as_ref();
    let rule = rule_for(options)?;
    apply(rule.as_ref(), path, std::fs::metadata(path), options.may_not_exist)
}

/// Non-blocking form of [`is_executable`].
pub async fn is_executable_async(
    path: impl AsRef<Path>,
    options: &IsExecutableOptions,
) -> Result<bool> {
    let path = path.as_ref();
    let rule = rule_for(options)?;
    let metadata = tokio::fs::metadata(path).await;
    apply(rule.as_ref(), path, metadata, options.may_not_exist)
}

/// Apply `rule` to the outcome of a status lookup.
pub(crate) fn apply(
    rule: &dyn ExecutableRule,
    path: &Path,
    metadata: io::Result<Metadata>,
    may_not_exist: bool,
) -> Result<bool> {
    match metadata {
        Ok(metadata) => rule.is_executable(path, &FileStatus::from(&metadata)),
        Err(e) if may_not_exist && e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn rule_for(options: &IsExecutableOptions) -> Result<Box<dyn ExecutableRule>> {
    let rule: Box<dyn ExecutableRule> = match Platform::current() {
        Platform::Posix => Box::new(PosixRule::with_overrides(options.uid, options.gid)?),
        Platform::Windows => Box::new(WindowsRule::new(&ExtensionList::from_env())),
    };
    Ok(rule)
}
