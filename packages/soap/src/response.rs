//! SOAP response parsing.
//!
//! Responses are small, so the whole body is read into an [`Element`] tree
//! and results are picked out of it by local name. Namespace prefixes are
//! dropped.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, SoapError};

/// An XML element reduced to its local name, text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// The first direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The first element called `name`, searching depth first.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find_map(|c| if c.name == name { Some(c) } else { c.find(name) })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Interpret the text as an `xsd:boolean`.
    pub fn as_bool(&self) -> Result<bool> {
        match self.text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(SoapError::malformed(format!(
                "{} is not a boolean: '{}'",
                self.name, other
            ))),
        }
    }

    /// The text of every `<string>` child.
    ///
    /// Absent, single and repeated children all come back as a list.
    pub fn strings(&self) -> Vec<String> {
        self.children
            .iter()
            .filter(|c| c.name == "string")
            .map(|c| c.text.clone())
            .collect()
    }

    /// Every `<ArrayOfString>` child as a row of strings.
    pub fn table(&self) -> Vec<Vec<String>> {
        self.children
            .iter()
            .filter(|c| c.name == "ArrayOfString")
            .map(Element::strings)
            .collect()
    }
}

/// Parse an XML document into a tree rooted at a synthetic `#document`
/// element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack = vec![Element::named("#document")];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(Element::named(name));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Element::named(name));
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(SoapError::malformed("unbalanced closing tag"));
                }
                if let Some(done) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(done);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(SoapError::malformed("document ended inside an element"));
    }
    stack
        .pop()
        .ok_or_else(|| SoapError::malformed("empty document"))
}

/// Extract the `{operation}Result` element from a response envelope.
///
/// A fault in the body becomes [`SoapError::Fault`]. Operations without a
/// return value yield an empty result element.
pub fn parse_response(xml: &str, operation: &str) -> Result<Element> {
    let document = parse_document(xml)?;
    let body = document
        .find("Body")
        .ok_or_else(|| SoapError::malformed("no SOAP body"))?;

    if let Some(fault) = body.child("Fault") {
        return Err(fault_error(fault));
    }

    let result_name = format!("{}Result", operation);
    let response_name = format!("{}Response", operation);
    let response = body
        .child(&response_name)
        .ok_or_else(|| SoapError::malformed(format!("missing {}", response_name)))?;

    Ok(response
        .child(&result_name)
        .cloned()
        .unwrap_or_else(|| Element::named(result_name)))
}

fn fault_error(fault: &Element) -> SoapError {
    let code = fault
        .child("faultcode")
        .or_else(|| fault.find("Value"))
        .map(|e| e.text.clone())
        .unwrap_or_default();
    let message = fault
        .child("faultstring")
        .or_else(|| fault.find("Text"))
        .map(|e| e.text.clone())
        .unwrap_or_default();
    SoapError::Fault { code, message }
}
