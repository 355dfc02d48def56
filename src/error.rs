use thiserror::Error;

/// Error types for PubMed client operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Response received but reported a non-success status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response body is not well-formed XML
    #[error("XML parsing error: {message}")]
    XmlParseError { message: String },
}

pub type Result<T> = std::result::Result<T, PubMedError>;
