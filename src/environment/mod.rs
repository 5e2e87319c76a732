//! Snapshots of the environment variables resolution reads.
//!
//! - `SearchPath`: the ordered directories of `PATH`
//! - `ExtensionList`: the executable suffixes of `PATHEXT`
//!
//! Both are plain values. They are captured once per resolution call and
//! never re-read while a scan is in progress.

mod extensions;
mod search_path;

pub use extensions::{ExtensionList, DEFAULT_EXTENSIONS};
pub use search_path::SearchPath;
