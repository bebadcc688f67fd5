use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Settings for one normalization run, fixed at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directories to process, in order.
    pub roots: Vec<PathBuf>,
    /// Clear the write-protection attribute of read-only entries so their
    /// timestamps can be rewritten. The original attribute is not restored.
    pub clear_readonly: bool,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("cannot traverse root: {0}")]
    RootInvalid(#[source] io::Error),

    /// The entry existed at enumeration time but was gone when processed.
    #[error("entry vanished before it was processed: {0}")]
    Vanished(#[source] io::Error),

    #[error("permission denied: {0}")]
    PermissionDenied(#[source] io::Error),

    /// Path-length or character restrictions of the platform.
    #[error("path not usable on this platform: {0}")]
    UnsupportedPath(#[source] io::Error),

    #[error("timestamp write failed: {0}")]
    WriteFailed(#[source] io::Error),
}

impl NormalizeError {
    /// Maps an I/O error from a stat, chmod or timestamp write onto the
    /// failure taxonomy by its kind.
    #[must_use]
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::Vanished(err),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(err),
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename => {
                Self::UnsupportedPath(err)
            }
            _ => Self::WriteFailed(err),
        }
    }

    /// Short label for the failure table.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::RootInvalid(_) => "invalid root",
            Self::Vanished(_) => "vanished",
            Self::PermissionDenied(_) => "permission denied",
            Self::UnsupportedPath(_) => "unsupported path",
            Self::WriteFailed(_) => "write failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classification() {
        let vanished = NormalizeError::from_io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(vanished, NormalizeError::Vanished(_)));

        let denied =
            NormalizeError::from_io(io::Error::new(io::ErrorKind::PermissionDenied, "no"));
        assert!(matches!(denied, NormalizeError::PermissionDenied(_)));

        let other = NormalizeError::from_io(io::Error::other("disk on fire"));
        assert!(matches!(other, NormalizeError::WriteFailed(_)));
    }
}
