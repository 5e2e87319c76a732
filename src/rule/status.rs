//! Platform-neutral view of file status.

use std::fs::Metadata;

/// The parts of a file's status the executability rules read.
///
/// The POSIX fields are `None` where the host does not report them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStatus {
    /// Whether the path is a regular file.
    pub is_file: bool,
    /// Permission bits.
    pub mode: Option<u32>,
    /// Owning user id.
    pub uid: Option<u32>,
    /// Owning group id.
    pub gid: Option<u32>,
}

impl From<&Metadata> for FileStatus {
    #[cfg(unix)]
    fn from(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        Self {
            is_file: metadata.is_file(),
            mode: Some(metadata.mode()),
            uid: Some(metadata.uid()),
            gid: Some(metadata.gid()),
        }
    }

    #[cfg(not(unix))]
    fn from(metadata: &Metadata) -> Self {
        Self {
            is_file: metadata.is_file(),
            ..Default::default()
        }
    }
}
