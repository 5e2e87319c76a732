//! # executable-discovery
//!
//! Locate and classify the executables reachable through `PATH`, with the
//! command-resolution semantics of a shell, uniformly on POSIX and Windows.
//! Nothing is ever spawned.
//!
//! ## Features
//!
//! - `resolve_all()` lazily yields every executable on the search path
//! - `resolve_first()` finds the executable a shell would run for a name
//! - `is_executable()` checks one path with the platform's rule
//! - Non-blocking `_async` variants of all three, on `tokio`
//! - `Resolver` binds a search path and rule explicitly, for reproducible
//!   resolution against a fixed environment snapshot
//!
//! On POSIX hosts a regular file is executable when its permission bits grant
//! execution to the effective user (or to anyone, for the superuser). On
//! Windows a regular file is executable when its extension is listed in
//! `PATHEXT`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use executable_discovery::{resolve_all, resolve_first, Filter, ResolveOptions};
//!
//! fn main() -> executable_discovery::Result<()> {
//!     // Find the executable `git` would resolve to
//!     if let Some(git) = resolve_first("git", &ResolveOptions::default())? {
//!         println!("git is at {}", git.path.display());
//!     }
//!
//!     // List every `cargo-*` subcommand on the search path
//!     let options = ResolveOptions {
//!         filters: vec![Filter::pattern("^cargo-")?],
//!         ..Default::default()
//!     };
//!     for entry in resolve_all(&options)? {
//!         println!("{}", entry?.name);
//!     }
//!     Ok(())
//! }
//! ```

mod entry;
mod environment;
mod error;
mod options;
mod platform;
mod resolve;
mod rule;
mod scan;

pub use entry::ExecutableEntry;
pub use environment::{ExtensionList, SearchPath, DEFAULT_EXTENSIONS};
pub use error::{Error, Result};
pub use options::{CwdMode, Filter, IsExecutableOptions, ResolveOptions};
pub use platform::Platform;
pub use resolve::{
    resolve_all, resolve_all_async, resolve_first, resolve_first_async, ExecutableIter, Resolver,
};
pub use rule::{
    is_executable, is_executable_async, ExecutableRule, FileStatus, PosixRule, WindowsRule,
};
