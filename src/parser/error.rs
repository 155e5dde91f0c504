//! Error types for target URL parsing.

use thiserror::Error;

/// Errors that can occur while parsing the target URL and its range expression.
///
/// All of these are pre-flight errors: they are surfaced before any network
/// or filesystem activity and abort the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// URL is malformed and could not be parsed at all.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Why the URL is invalid
        reason: String,
    },

    /// URL uses a scheme other than http or https.
    #[error("scheme '{scheme}' is not supported\n  Suggestion: use an http:// or https:// URL")]
    UnsupportedScheme {
        /// The URL that failed validation
        url: String,
        /// The offending scheme
        scheme: String,
    },

    /// No bracketed range expression was found in the URL path.
    #[error(
        "no sequential range specified in '{path}'\n  Suggestion: embed a bracket expression like [1-100] in the path"
    )]
    NoRangeSpecified {
        /// The path that was searched
        path: String,
    },

    /// A bracket expression was present but contained no range tokens.
    #[error("empty range expression in '{path}'")]
    EmptyRange {
        /// The path containing the empty brackets
        path: String,
    },

    /// A comma-separated token is neither a number nor a dash range of numbers.
    #[error("wrong range format '{token}'\n  Suggestion: use a number (7) or a dash range (1-100)")]
    InvalidRangeFormat {
        /// The token that failed validation
        token: String,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error for a URL the `url` crate rejected.
    #[must_use]
    pub fn malformed(url: &str, reason: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without a host.
    #[must_use]
    pub fn no_host(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        }
    }

    /// Creates an `UnsupportedScheme` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }
    }

    /// Creates a `NoRangeSpecified` error for a path without brackets.
    #[must_use]
    pub fn no_range(path: &str) -> Self {
        Self::NoRangeSpecified {
            path: path.to_string(),
        }
    }

    /// Creates an `EmptyRange` error for `[]` or brackets of only commas.
    #[must_use]
    pub fn empty_range(path: &str) -> Self {
        Self::EmptyRange {
            path: path.to_string(),
        }
    }

    /// Creates an `InvalidRangeFormat` error for a malformed token.
    #[must_use]
    pub fn invalid_range_format(token: &str) -> Self {
        Self::InvalidRangeFormat {
            token: token.to_string(),
        }
    }
}
