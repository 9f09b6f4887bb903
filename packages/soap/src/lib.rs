//! # livedocx-soap
//!
//! The transport boundary of the LiveDocx client: SOAP 1.1 over HTTP.
//!
//! - [`SoapCall`] describes one remote operation and its parameters
//! - [`Transport`] invokes a call and hands back its result element;
//!   [`HttpTransport`] is the real one
//! - [`Session`] is the authenticated handle every higher layer receives,
//!   with a typed method per remote operation
//!
//! With the `test-utils` feature, [`mock::MockTransport`] records calls
//! instead of sending them.

pub mod call;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod listing;
pub mod response;
pub mod session;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use call::{Param, SoapCall};
pub use config::ServiceConfig;
pub use error::{Result, SoapError};
pub use executor::{ReqwestExecutor, SoapExecutor, SoapRequest, SoapResponse};
pub use listing::RemoteFile;
pub use response::Element;
pub use session::Session;
pub use transport::{HttpTransport, Transport};
