use std::collections::HashMap;

use reqwest::StatusCode;

/// Decoded metadata header fields, keyed by field name.
pub type Metadata = HashMap<String, String>;

/// Uniform result of a single API call that reached the server.
///
/// Exactly one of the payload and the error message is present, decided by
/// the status code alone: `>= 400` carries the raw error body, anything
/// below carries the decoded payload. Transport and decode failures never
/// produce an envelope; they are returned as [`Error`](crate::Error).
#[derive(Clone, Debug)]
pub struct ResponseEnvelope<T> {
    status: StatusCode,
    reason: String,
    error_message: Option<String>,
    payload: Option<T>,
    metadata: Metadata,
}

impl<T> ResponseEnvelope<T> {
    pub(crate) fn success(status: StatusCode, payload: T, metadata: Metadata) -> Self {
        Self {
            status,
            reason: reason_phrase(status),
            error_message: None,
            payload: Some(payload),
            metadata,
        }
    }

    pub(crate) fn failure(status: StatusCode, error_message: String) -> Self {
        Self {
            status,
            reason: reason_phrase(status),
            error_message: Some(error_message),
            payload: None,
            metadata: Metadata::new(),
        }
    }

    /// Replaces the canonical reason phrase with the one the server sent.
    pub(crate) fn with_reason(mut self, reason: Option<String>) -> Self {
        if let Some(reason) = reason {
            self.reason = reason;
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase of the status line. A phrase the server sent that
    /// differs from the canonical one is kept as sent; otherwise this is the
    /// canonical phrase, empty for unregistered codes.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn has_errors(&self) -> bool {
        self.status.as_u16() >= 400
    }

    /// Raw response body of a failed call.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_value(&self, field: &str) -> Option<&str> {
        self.metadata.get(field).map(String::as_str)
    }

    /// Splits the envelope into the payload or the failing status and body.
    pub fn into_result(self) -> Result<(T, Metadata), (StatusCode, String)> {
        match (self.payload, self.error_message) {
            (Some(payload), None) => Ok((payload, self.metadata)),
            (_, message) => Err((self.status, message.unwrap_or_default())),
        }
    }

    /// Maps the payload, keeping status, reason and metadata.
    pub fn map<U, F>(self, f: F) -> ResponseEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ResponseEnvelope {
            status: self.status,
            reason: self.reason,
            error_message: self.error_message,
            payload: self.payload.map(f),
            metadata: self.metadata,
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
