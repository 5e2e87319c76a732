//! Error types for executable resolution.
//!
//! Resolution distinguishes between errors that are recovered locally (a
//! single unreadable entry, a missing search directory) and errors that abort
//! the whole call. Only the latter ever reach the caller, as an [`Error`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort an executability check or a resolution call.
///
/// # Example
///
/// ```rust
/// use executable_discovery::{is_executable, IsExecutableOptions};
///
/// match is_executable("/definitely/not/here", &IsExecutableOptions::default()) {
///     Ok(found) => println!("executable: {found}"),
///     Err(e) if e.is_not_found() => println!("no such file"),
///     Err(e) => eprintln!("check failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A path that must be absolute was relative.
    #[error("`{}` is not an absolute path", path.display())]
    RelativePath {
        /// The offending path.
        path: PathBuf,
    },

    /// An executable extension did not start with `.`.
    #[error("`{value}` is not a valid file extension")]
    InvalidExtension {
        /// The offending value.
        value: String,
    },

    /// A pattern filter could not be compiled.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The process working directory could not be determined.
    #[error("unable to determine the current working directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// The effective user or group id of the process is unavailable.
    #[error("unable to get the {id} ID of the process")]
    UnresolvedIdentity {
        /// Either `"user"` or `"group"`.
        id: &'static str,
    },

    /// The file status lacks a field the POSIX rule needs.
    #[error("unable to get the {field} of `{}`", path.display())]
    MissingFileStatus {
        /// Path whose status was incomplete.
        path: PathBuf,
        /// Missing field: `"mode"`, `"user ID"` or `"group ID"`.
        field: &'static str,
    },

    /// An I/O operation on `path` failed.
    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A list of paths could not be encoded into a single variable value.
    #[error("unable to join search path: {0}")]
    JoinPaths(#[from] std::env::JoinPathsError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is an I/O "not found" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Whether this error was raised by input validation, before any I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RelativePath { .. } | Self::InvalidExtension { .. } | Self::InvalidPattern(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_display() {
        let error = Error::RelativePath {
            path: PathBuf::from("bin"),
        };
        assert_eq!(error.to_string(), "`bin` is not an absolute path");
        assert!(error.is_configuration());
    }

    #[test]
    fn test_invalid_extension_display() {
        let error = Error::InvalidExtension {
            value: "EXE".to_string(),
        };
        assert_eq!(error.to_string(), "`EXE` is not a valid file extension");
        assert!(error.is_configuration());
    }

    #[test]
    fn test_is_not_found() {
        let error = Error::io(
            "/missing",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(error.is_not_found());
        assert!(!error.is_configuration());

        let error = Error::io(
            "/locked",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_missing_file_status_display() {
        let error = Error::MissingFileStatus {
            path: PathBuf::from("/usr/bin/tool"),
            field: "mode",
        };
        assert_eq!(error.to_string(), "unable to get the mode of `/usr/bin/tool`");
    }

    #[test]
    fn test_unresolved_identity_display() {
        let error = Error::UnresolvedIdentity { id: "group" };
        assert_eq!(error.to_string(), "unable to get the group ID of the process");
    }
}
