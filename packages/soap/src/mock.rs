//! In-memory transport for tests.
//!
//! [`MockTransport`] records every [`SoapCall`] and answers from responses
//! configured per operation. Operations without a configured response
//! succeed with an empty result. Clones share their state, so a test can
//! keep one handle while a session owns another.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::call::SoapCall;
use crate::error::{Result, SoapError};
use crate::response::Element;
use crate::transport::Transport;

/// A canned answer to one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    Empty,
    Text(String),
    Bool(bool),
    Strings(Vec<String>),
    Table(Vec<Vec<String>>),
    /// Fail with a SOAP fault carrying this message.
    Fault(String),
}

impl MockResponse {
    pub fn text(value: impl Into<String>) -> Self {
        MockResponse::Text(value.into())
    }

    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Strings(values.into_iter().map(Into::into).collect())
    }

    pub fn table<S: Into<String>>(rows: Vec<Vec<S>>) -> Self {
        MockResponse::Table(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    fn into_result(self, operation: &str) -> Result<Element> {
        let result = Element::named(format!("{}Result", operation));
        let strings = |values: Vec<String>| -> Vec<Element> {
            values
                .into_iter()
                .map(|v| Element::named("string").with_text(v))
                .collect()
        };
        Ok(match self {
            MockResponse::Empty => result,
            MockResponse::Text(text) => result.with_text(text),
            MockResponse::Bool(value) => result.with_text(value.to_string()),
            MockResponse::Strings(values) => Element {
                children: strings(values),
                ..result
            },
            MockResponse::Table(rows) => Element {
                children: rows
                    .into_iter()
                    .map(|row| Element {
                        children: strings(row),
                        ..Element::named("ArrayOfString")
                    })
                    .collect(),
                ..result
            },
            MockResponse::Fault(message) => {
                return Err(SoapError::Fault {
                    code: "soap:Server".to_string(),
                    message,
                })
            }
        })
    }
}

#[derive(Clone, Default)]
pub struct MockTransport {
    /// Queued responses per operation; the last one repeats.
    responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    recorded_calls: Arc<Mutex<Vec<SoapCall>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `operation` with `response`.
    pub fn with_response(self, operation: impl Into<String>, response: MockResponse) -> Self {
        self.with_responses(operation, vec![response])
    }

    /// Answer successive calls to `operation` in order, repeating the last.
    pub fn with_responses(
        self,
        operation: impl Into<String>,
        responses: Vec<MockResponse>,
    ) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(operation.into(), responses.into());
        self
    }

    /// Fail every call to `operation` with a SOAP fault.
    pub fn fail(self, operation: impl Into<String>, message: impl Into<String>) -> Self {
        self.with_response(operation, MockResponse::Fault(message.into()))
    }

    pub fn recorded_calls(&self) -> Vec<SoapCall> {
        self.recorded_calls.lock().unwrap().clone()
    }

    /// Names of the recorded operations, in call order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.recorded_calls
            .lock()
            .unwrap()
            .iter()
            .map(SoapCall::operation)
            .collect()
    }

    /// Recorded calls to `operation`.
    pub fn calls_to(&self, operation: &str) -> Vec<SoapCall> {
        self.recorded_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation() == operation)
            .cloned()
            .collect()
    }

    pub fn clear_recorded(&self) {
        self.recorded_calls.lock().unwrap().clear();
    }

    fn next_response(&self, operation: &str) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(operation) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(MockResponse::Empty),
            Some(queue) => queue.front().cloned().unwrap_or(MockResponse::Empty),
            None => MockResponse::Empty,
        }
    }
}

impl Transport for MockTransport {
    fn invoke(&self, call: &SoapCall) -> Result<Element> {
        self.recorded_calls.lock().unwrap().push(call.clone());
        self.next_response(call.operation())
            .into_result(call.operation())
    }
}
