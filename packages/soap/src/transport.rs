//! The transport boundary: one [`SoapCall`] in, one result element out.

use crate::call::SoapCall;
use crate::config::ServiceConfig;
use crate::envelope::write_envelope;
use crate::error::{Result, SoapError};
use crate::executor::{ReqwestExecutor, SoapExecutor, SoapRequest};
use crate::response::{parse_response, Element};

/// Something that can invoke remote operations.
pub trait Transport {
    /// Invoke `call` and return its `{Operation}Result` element.
    fn invoke(&self, call: &SoapCall) -> Result<Element>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke(&self, call: &SoapCall) -> Result<Element> {
        (**self).invoke(call)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn invoke(&self, call: &SoapCall) -> Result<Element> {
        (**self).invoke(call)
    }
}

/// SOAP 1.1 over HTTP.
pub struct HttpTransport<E: SoapExecutor = ReqwestExecutor> {
    executor: E,
    endpoint: String,
    namespace: String,
}

impl HttpTransport<ReqwestExecutor> {
    /// A transport for `config`, posting with reqwest.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let executor = ReqwestExecutor::new(config.timeout())
            .map_err(|message| SoapError::Transport { message })?;
        Self::with_executor(executor, config)
    }
}

impl<E: SoapExecutor> HttpTransport<E> {
    pub fn with_executor(executor: E, config: &ServiceConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        Ok(Self {
            executor,
            endpoint: endpoint.to_string(),
            namespace: config.namespace.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: SoapExecutor> Transport for HttpTransport<E> {
    fn invoke(&self, call: &SoapCall) -> Result<Element> {
        let request = SoapRequest {
            endpoint: self.endpoint.clone(),
            action: format!("{}{}", self.namespace, call.operation()),
            body: write_envelope(call, &self.namespace)?,
        };

        tracing::debug!(
            operation = call.operation(),
            endpoint = %self.endpoint,
            "invoking remote operation"
        );

        let response = self
            .executor
            .execute(&request)
            .map_err(|message| SoapError::Transport { message })?;

        match parse_response(&response.body, call.operation()) {
            Ok(result) if response.is_success() => Ok(result),
            Err(fault @ SoapError::Fault { .. }) => Err(fault),
            Ok(_) | Err(_) if !response.is_success() => Err(SoapError::HttpStatus {
                status: response.status,
                body: response.body,
            }),
            other => other,
        }
    }
}
