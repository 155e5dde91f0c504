//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while requesting or streaming one item.
///
/// These are transport- and filesystem-level errors; the fetch driver maps
/// them into per-item [`FetchOutcome`](super::FetchOutcome) values rather
/// than letting them abort the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (connection refused, reset, abrupt peer close).
    #[error("network error requesting {path}: {source}")]
    Network {
        /// The request path that failed.
        path: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request or body read timed out.
    #[error("timeout requesting {path}")]
    Timeout {
        /// The request path that timed out.
        path: String,
    },

    /// File system error while writing the downloaded body.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Creates a network error for a request path.
    pub fn network(path: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            path: path.into(),
            source,
        }
    }

    /// Creates a timeout error for a request path.
    pub fn timeout(path: impl Into<String>) -> Self {
        Self::Timeout { path: path.into() }
    }

    /// Creates an IO error for a local file path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error means the connection itself is suspect
    /// (timeout or peer-level failure) rather than a local problem.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }
}

// No blanket From impls: the variants require context (request path, file
// path) that the source errors do not carry. Callers use the helper
// constructors instead.
