/// Structured error types for ongoctl-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (ongoctl-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the HTTP collaborator (transport-level taxonomy).
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network failure, timeout, or unreadable response body
    #[error("connection unavailable: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// Non-2xx status without a parseable envelope
    #[error("server returned HTTP {status} for {target}")]
    Http { status: u16, target: String },

    /// Bearer token rejected; the persisted session has been cleared
    #[error("session expired (401), stored credentials cleared")]
    AuthExpired,

    /// Well-formed JSON that does not match the expected envelope shape
    #[error("malformed envelope from {target}: {source}")]
    Decode {
        target: String,
        source: serde_json::Error,
    },

    /// Session or config file could not be read or written
    #[error("failed to access {path:?}: {source}")]
    Storage {
        path: PathBuf,
        source: io::Error,
    },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl ApiError {
    /// Create a decode error with the dispatched target as context
    pub fn decode(target: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            target: target.into(),
            source,
        }
    }

    /// Create a storage error for a session/config path
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by list retrieval and write operations.
///
/// `Rejected` is the backend's business-level refusal (`success: false`);
/// the retriever keeps previously displayed data when it occurs.
/// `Connection` wraps any transport-level failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Soft failure: the backend answered with `success: false`
    #[error("{message}")]
    Rejected { message: String },

    /// Transport failure: the request never produced a usable envelope
    #[error(transparent)]
    Connection(#[from] ApiError),
}

impl FetchError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// True when retrying the same operation might succeed without
    /// the user changing anything (i.e. a connectivity problem).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type alias for ongoctl-core operations
pub type Result<T> = std::result::Result<T, FetchError>;
