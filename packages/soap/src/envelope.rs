//! SOAP 1.1 request envelopes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::call::{Param, SoapCall};
use crate::error::{Result, SoapError};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Render `call` as a SOAP 1.1 envelope, with the operation element in
/// `namespace`.
pub fn write_envelope(call: &SoapCall, namespace: &str) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:soap", SOAP_ENV_NS));
    writer.write_event(Event::Start(envelope))?;
    writer.write_event(Event::Start(BytesStart::new("soap:Body")))?;

    let mut operation = BytesStart::new(call.operation());
    operation.push_attribute(("xmlns", namespace));
    writer.write_event(Event::Start(operation))?;

    for (name, param) in call.params() {
        write_param(&mut writer, name, param)?;
    }

    writer.write_event(Event::End(BytesEnd::new(call.operation())))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Envelope")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| SoapError::malformed(format!("envelope is not UTF-8: {}", e)))
}

fn write_param(writer: &mut Writer<Vec<u8>>, name: &str, param: &Param) -> Result<()> {
    match param {
        Param::Text(value) => write_text(writer, name, value),
        Param::Bool(value) => write_text(writer, name, if *value { "true" } else { "false" }),
        Param::Int(value) => write_text(writer, name, &value.to_string()),
        Param::List(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            write_strings(writer, items)?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
        Param::Table(table) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for row in table.rows() {
                writer.write_event(Event::Start(BytesStart::new("ArrayOfString")))?;
                write_strings(writer, row)?;
                writer.write_event(Event::End(BytesEnd::new("ArrayOfString")))?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
            Ok(())
        }
    }
}

fn write_strings(writer: &mut Writer<Vec<u8>>, items: &[String]) -> Result<()> {
    for item in items {
        write_text(writer, "string", item)?;
    }
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
