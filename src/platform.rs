//! Platform family selecting the executability rule.

use crate::rule::{ExecutableRule, PosixRule, WindowsRule};
use crate::{ExtensionList, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// The family of executability semantics a host follows.
///
/// POSIX hosts decide from permission bits and ownership; Windows hosts
/// decide from the file name's extension against `PATHEXT`.
///
/// # Example
///
/// ```rust
/// use executable_discovery::Platform;
///
/// for platform in Platform::all() {
///     println!("{}: delimiter {:?}", platform, platform.path_delimiter());
/// }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Unix-like hosts.
    #[strum(serialize = "POSIX")]
    Posix,
    /// Windows hosts.
    #[strum(serialize = "Windows")]
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Delimiter used to join multi-value variables such as `PATH`.
    ///
    /// Informational only: [`SearchPath::to_env_value`](crate::SearchPath::to_env_value)
    /// always encodes for the host with [`std::env::join_paths`], whatever
    /// platform is named here.
    pub fn path_delimiter(&self) -> char {
        match self {
            Self::Posix => ':',
            Self::Windows => ';',
        }
    }

    /// Build this platform's rule from the process environment.
    ///
    /// POSIX captures the effective user and group id; Windows captures
    /// `PATHEXT`. Both are read once, here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedIdentity`](crate::Error::UnresolvedIdentity)
    /// when the POSIX identity is unavailable.
    pub fn rule_from_env(&self) -> Result<Arc<dyn ExecutableRule>> {
        let rule: Arc<dyn ExecutableRule> = match self {
            Self::Posix => Arc::new(PosixRule::from_process()?),
            Self::Windows => Arc::new(WindowsRule::new(&ExtensionList::from_env())),
        };
        Ok(rule)
    }

    /// Iterator over every platform family.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
