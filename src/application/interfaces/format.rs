use crate::error::AppError;
use crate::model::xml::XmlElement;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Format views over the body of the last response
///
/// Implementors only provide the stored body and how it decodes into a JSON
/// value; every other view is derived from those two. All views are pure:
/// calling them never touches the network or the stored body.
pub trait ResponseFormat {
    /// Body of the last completed request, empty before the first one
    fn raw(&self) -> &str;

    /// Decodes the stored body into a dynamic JSON value
    fn as_value(&self) -> Result<Value, AppError>;

    /// Stored body, unchanged
    fn as_raw(&self) -> &str {
        self.raw()
    }

    /// Stored body parsed as an XML tree
    fn as_xml(&self) -> Result<XmlElement, AppError> {
        XmlElement::parse(non_empty(self.raw())?)
    }

    /// Compact JSON of the decoded body with every empty object written as
    /// `null`
    fn as_json(&self) -> Result<String, AppError> {
        let value = empty_objects_to_null(self.as_value()?);
        Ok(serde_json::to_string(&value)?)
    }

    /// [`ResponseFormat::as_json`] decoded into a map
    ///
    /// An empty response object, written as `null` by `as_json`, gives an
    /// empty map. Any other non-object value is an error.
    fn as_map(&self) -> Result<Map<String, Value>, AppError> {
        match serde_json::from_str::<Value>(&self.as_json()?)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(AppError::Deserialization(format!(
                "expected a json object, found {}",
                kind(&other)
            ))),
        }
    }

    /// [`ResponseFormat::as_json`] decoded into a caller supplied type
    fn as_object<T: DeserializeOwned>(&self) -> Result<T, AppError>
    where
        Self: Sized,
    {
        Ok(serde_json::from_str(&self.as_json()?)?)
    }
}

/// Fails with [`AppError::EmptyResponse`] when nothing has been received yet
pub(crate) fn non_empty(raw: &str) -> Result<&str, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::EmptyResponse);
    }
    Ok(raw)
}

fn empty_objects_to_null(value: Value) -> Value {
    match value {
        Value::Object(map) if map.is_empty() => Value::Null,
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, empty_objects_to_null(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(empty_objects_to_null).collect()),
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
