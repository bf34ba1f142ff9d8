//! Error types for name lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Outcomes of a lookup that are not ordinary answers.
///
/// "Not found" is not an error: queries return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Cancellation was requested; the whole compilation must unwind
    /// without reporting a compile error.
    #[error("lookup aborted: cancellation requested")]
    Aborted,
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Failures while opening or reading a classpath location.
///
/// These never leave the location that raised them; they are logged and
/// the location behaves as empty.
#[derive(Debug, Error)]
pub(crate) enum LocationError {
    /// The root does not exist on disk.
    #[error("classpath root not found: {0}")]
    Missing(PathBuf),

    /// IO error while reading a root or entry.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be opened or an entry could not be read.
    #[error("archive error on {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl LocationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }
}
