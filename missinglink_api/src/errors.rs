//! Error types for the API client.
//!
//! A response with a failing HTTP status is not an error here: it comes back
//! as a [`ResponseEnvelope`](crate::types::ResponseEnvelope) with
//! `has_errors() == true`. The variants below are the outcomes a caller has to
//! treat differently from an application-level failure.

use std::fmt;

/// Maximum number of body bytes kept in diagnostic detail.
const MAX_DETAIL: usize = 2000;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL and path fragment did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The base URL cannot have paths joined onto it (query, fragment or
    /// non-hierarchical scheme).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// A request body could not be serialized.
    #[error("Failed to serialize request body")]
    Encode(#[source] serde_json::Error),
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// The request never produced a full response (timeout, DNS, connection, body read).
    #[error("Request failed")]
    Transport(#[source] reqwest::Error),
    /// A success response body did not match the expected type.
    #[error("Failed to parse response body")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// A metadata header carried a value that is not a JSON object of fields.
    #[error("Failed to decode {header} header")]
    Metadata {
        header: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification of an [`Error`], for callers that branch on the
/// kind of failure rather than on the concrete variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be built from the supplied configuration.
    InvalidRequest,
    /// The configured timeout elapsed before a full response arrived.
    Timeout,
    /// Any other network-level failure.
    Transport,
    /// The response body did not match the expected shape.
    Decode,
    /// A metadata header could not be decoded.
    Metadata,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Transport => "transport error",
            ErrorKind::Decode => "decode error",
            ErrorKind::Metadata => "metadata error",
        };
        f.write_str(s)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_)
            | Error::InvalidBaseUrl(_)
            | Error::Encode(_)
            | Error::ClientBuild(_) => ErrorKind::InvalidRequest,
            Error::Transport(e) if e.is_timeout() => ErrorKind::Timeout,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Metadata { .. } => ErrorKind::Metadata,
        }
    }

    /// Diagnostic detail that is deliberately left out of `Display`: the
    /// underlying cause and, for body decode failures, a body snippet.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::InvalidUrl(_) | Error::InvalidBaseUrl(_) => None,
            Error::Encode(e) => Some(e.to_string()),
            Error::ClientBuild(e) | Error::Transport(e) => Some(e.to_string()),
            Error::Decode { source, body } => {
                Some(format!("{} | body: {}", source, truncate_body(body)))
            }
            Error::Metadata { source, .. } => Some(source.to_string()),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_DETAIL {
        return body.to_string();
    }
    let mut end = MAX_DETAIL;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
