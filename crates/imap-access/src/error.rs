//! Error types for imap-access.

use std::io;
use std::path::PathBuf;

use imap_naming::NamingError;
use imap_query::QueryParameterError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Query(#[from] QueryParameterError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    LocalFile(#[from] LocalFileError),

    #[error("file I/O error at {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Failure talking to the archive or to the presigned upload target.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP Error: {status} - {reason}\nServer Message: {message}")]
    Http {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("URL Error: {0}")]
    Connection(String),

    #[error("redirect loop detected (more than {count} redirects)")]
    TooManyRedirects { count: usize },

    #[error("redirect response {status} without a Location header")]
    MissingLocation { status: u16 },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LocalFileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file {} is outside the data directory {}", .path.display(), .data_dir.display())]
    OutsideDataDir { path: PathBuf, data_dir: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
