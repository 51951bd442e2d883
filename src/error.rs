//! Error types for training-client
//!
//! Errors are grouped into a small taxonomy (see [`ErrorKind`]):
//! - transport failures talking to the server
//! - protocol failures decoding what the server sent back
//! - semantic failures where the exchange worked but the answer is unusable
//! - local I/O failures reading uploads or publishing downloads
//! - configuration mistakes caught before any request is made

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for training-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for training-client
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "server_url")
        key: Option<String>,
    },

    /// Connection, timeout or TLS failure while talking to the server
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server replied with a body that is not the expected JSON
    #[error("bad JSON from {url}: {source}")]
    Decode {
        /// URL the response came from
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The server rejected this client version and asked for an upgrade
    #[error("the client version you are using is not accepted by the server ({url})")]
    IncompatibleClient {
        /// URL that returned the upgrade notice
        url: String,
    },

    /// The server returned a work assignment without a network hash
    #[error("server gave back empty hash")]
    EmptyHash,

    /// A content hash that cannot be used as a resource key or file name
    #[error("invalid content hash {sha:?}")]
    InvalidHash {
        /// The rejected hash
        sha: String,
    },

    /// The server answered with an error status (400 and above)
    #[error("server at {url} gave error status {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The file to upload could not be read
    #[error("failed to read upload file {path}: {source}")]
    UploadFile {
        /// Path of the file to upload
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`]
///
/// Callers that layer retry policies on top of this crate can use the kind to
/// decide what is worth repeating; this crate never retries by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid client configuration
    Config,
    /// Connection, timeout or TLS failure
    Transport,
    /// Malformed or rejected response body
    Protocol,
    /// Well-formed exchange with an unusable result
    Semantic,
    /// Local filesystem failure
    LocalIo,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } => ErrorKind::Config,
            Error::Network(_) => ErrorKind::Transport,
            Error::Decode { .. } | Error::IncompatibleClient { .. } => ErrorKind::Protocol,
            Error::EmptyHash | Error::InvalidHash { .. } | Error::HttpStatus { .. } => {
                ErrorKind::Semantic
            }
            Error::UploadFile { .. } | Error::Io(_) => ErrorKind::LocalIo,
        }
    }

    /// True when the server signalled that this client must be upgraded
    pub fn is_incompatible_client(&self) -> bool {
        matches!(self, Error::IncompatibleClient { .. })
    }
}
