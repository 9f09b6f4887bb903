//! Error types for the SOAP transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoapError {
    /// The HTTP exchange itself failed (connection, timeout, TLS...).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The endpoint answered with a non-success status and no SOAP fault.
    #[error("HTTP {status} from the SOAP endpoint")]
    HttpStatus { status: u16, body: String },

    /// The service rejected the call.
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed SOAP response: {message}")]
    MalformedResponse { message: String },

    /// An operation was attempted before logging in.
    #[error("the session is not authenticated")]
    NotAuthenticated,

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl SoapError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SoapError::MalformedResponse {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SoapError>;
