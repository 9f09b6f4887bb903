//! HTTP execution abstraction for testing.
//!
//! The transport hands a finished envelope to a [`SoapExecutor`], so tests
//! can swap the network for canned responses.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// A SOAP request ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    pub endpoint: String,
    /// Value of the `SOAPAction` header, without the surrounding quotes.
    pub action: String,
    pub body: String,
}

/// The raw HTTP answer to a [`SoapRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapResponse {
    pub status: u16,
    pub body: String,
}

impl SoapResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for posting SOAP requests.
///
/// Implementations can use real HTTP clients or mock responses for testing.
pub trait SoapExecutor: Send + Sync {
    /// Post the request and return the response.
    ///
    /// Returns `Err` with a message if no response was received.
    fn execute(&self, request: &SoapRequest) -> Result<SoapResponse, String>;
}

/// Production executor using reqwest.
///
/// The client keeps a cookie store: the service ties the authenticated
/// session to its session cookie.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, String> {
        Self::new(Duration::from_secs(30))
    }
}

impl SoapExecutor for ReqwestExecutor {
    fn execute(&self, request: &SoapRequest) -> Result<SoapResponse, String> {
        let action = HeaderValue::try_from(format!("\"{}\"", request.action))
            .map_err(|e| e.to_string())?;

        let response = self
            .client
            .post(&request.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/xml; charset=utf-8"))
            .header("SOAPAction", action)
            .body(request.body.clone())
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| e.to_string())?;

        Ok(SoapResponse { status, body })
    }
}
