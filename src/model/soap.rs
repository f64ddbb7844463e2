//! SOAP 1.1 envelope encoding and response decoding
use crate::constants::SOAP_ENVELOPE_NS;
use crate::error::AppError;
use crate::model::requests::SoapRequest;
use crate::model::xml::{XmlElement, local};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Number, Value};
use std::io::Cursor;

const ENVELOPE_PREFIX: &str = "SOAP-ENV";
const OPERATION_PREFIX: &str = "ns1";

/// Builds the request envelope for `request` with the operation element
/// bound to `namespace`.
pub fn build_envelope(request: &SoapRequest, namespace: &str) -> Result<String, AppError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let envelope = format!("{ENVELOPE_PREFIX}:Envelope");
    let body = format!("{ENVELOPE_PREFIX}:Body");
    let operation = format!("{OPERATION_PREFIX}:{}", request.operation.name());

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(
        &mut writer,
        Event::Start(BytesStart::new(envelope.as_str()).with_attributes([
            ("xmlns:SOAP-ENV", SOAP_ENVELOPE_NS),
            ("xmlns:ns1", namespace),
        ])),
    )?;
    write(&mut writer, Event::Start(BytesStart::new(body.as_str())))?;
    write(&mut writer, Event::Start(BytesStart::new(operation.as_str())))?;

    for (name, value) in &request.params {
        write(&mut writer, Event::Start(BytesStart::new(*name)))?;
        write(&mut writer, Event::Text(BytesText::new(value)))?;
        write(&mut writer, Event::End(BytesEnd::new(*name)))?;
    }

    write(&mut writer, Event::End(BytesEnd::new(operation.as_str())))?;
    write(&mut writer, Event::End(BytesEnd::new(body.as_str())))?;
    write(&mut writer, Event::End(BytesEnd::new(envelope.as_str())))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| AppError::SerializationError(e.to_string()))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), AppError> {
    writer
        .write_event(event)
        .map_err(|e| AppError::SerializationError(e.to_string()))
}

/// Value of the `SOAPAction` header for an operation
pub fn soap_action(namespace: &str, operation: &str) -> String {
    format!("\"{namespace}#{operation}\"")
}

/// Returns the operation response element carried in the envelope body.
///
/// A `Fault` in the body is turned into [`AppError::SoapFault`].
pub fn response_element(envelope: &XmlElement) -> Result<&XmlElement, AppError> {
    if envelope.local_name() != "Envelope" {
        return Err(AppError::Deserialization(format!(
            "expected soap envelope, found <{}>",
            envelope.name
        )));
    }
    let body = envelope
        .child("Body")
        .ok_or_else(|| AppError::Deserialization("soap envelope has no body".to_string()))?;
    let response = body
        .children
        .first()
        .ok_or_else(|| AppError::Deserialization("soap body is empty".to_string()))?;

    if response.local_name() == "Fault" {
        let text = |name: &str| {
            response
                .child(name)
                .map(|e| e.text().to_string())
                .unwrap_or_default()
        };
        return Err(AppError::SoapFault {
            code: text("faultcode"),
            message: text("faultstring"),
        });
    }
    Ok(response)
}

/// Decodes the result carried by an operation response element.
///
/// A response with a single part yields that part directly; otherwise all
/// parts are returned as one object. A response without parts is `null`.
pub fn decode_result(response: &XmlElement) -> Value {
    match response.children.as_slice() {
        [] if response.text().trim().is_empty() => Value::Null,
        [only] => soap_value(only),
        _ => soap_value(response),
    }
}

/// Converts a SOAP-encoded element, honouring `xsi:nil`, `xsi:type` and
/// encoded arrays.
pub fn soap_value(element: &XmlElement) -> Value {
    if element.attribute("nil") == Some("true") {
        return Value::Null;
    }

    let xsi_type = element.attribute("type").map(local);
    if element.attribute("arrayType").is_some() || xsi_type == Some("Array") {
        return Value::Array(element.children.iter().map(soap_value).collect());
    }

    if element.children.is_empty() {
        return scalar(element.text(), xsi_type);
    }

    let mut object = Map::new();
    for child in &element.children {
        let value = soap_value(child);
        match object.get_mut(child.local_name()) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                object.insert(child.local_name().to_string(), value);
            }
        }
    }
    Value::Object(object)
}

fn scalar(text: &str, xsi_type: Option<&str>) -> Value {
    match xsi_type {
        Some("int" | "integer" | "long" | "short" | "byte" | "unsignedInt" | "unsignedLong") => {
            text.trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(text.to_string()))
        }
        Some("double" | "float" | "decimal") => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(text.to_string())),
        Some("boolean") => Value::Bool(matches!(text.trim(), "true" | "1")),
        Some("string" | "base64Binary" | "date" | "dateTime") | None => {
            Value::String(text.to_string())
        }
        // empty struct of a named complex type
        Some(_) if text.is_empty() => Value::Object(Map::new()),
        Some(_) => Value::String(text.to_string()),
    }
}
