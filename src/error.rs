//! Error types for business API operations.

use thiserror::Error;

/// Errors that can occur during business API operations.
#[derive(Debug, Error)]
pub enum BizError {
    /// Configuration is missing or incomplete.
    #[error("API configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration value is present but unusable.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// The authenticate call was rejected.
    ///
    /// Bad credentials or an expired password. Fatal for whatever operation
    /// triggered it; the client never retries authentication.
    #[error("Authentication failed ({status_code}): {message}")]
    AuthenticationFailed { message: String, status_code: u16 },

    /// A record is missing the field that identifies it on the wire.
    #[error("{entity_type} record has no {field}; it is required to address the resource")]
    MissingField {
        entity_type: &'static str,
        field: &'static str,
    },

    /// A business API request returned a non-success status.
    ///
    /// `message` is the server's response body text. The upstream API has no
    /// structured error schema; callers match on substrings of the message
    /// (e.g. `"not provided"` for missing required fields).
    #[error("API request failed ({status_code}): {message}")]
    ApiError { message: String, status_code: u16 },

    /// HTTP transport error (DNS, connection refused, timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// XML read/write error during transcoding.
    #[error("XML transcoding error: {0}")]
    XmlError(String),

    /// A dictionary key is not a valid XML element name.
    ///
    /// Record dictionaries become XML elements server-side, so keys are
    /// validated before submission.
    #[error("Dictionary keys cannot be serialized as XML element names: {0}")]
    InvalidKeyName(String),
}

/// Result type alias for business API operations.
pub type Result<T> = core::result::Result<T, BizError>;
