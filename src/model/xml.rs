//! Owned XML tree and its conversion to JSON values
//!
//! Vendor responses are small documents, so they are parsed eagerly into an
//! [`XmlElement`] tree with `quick-xml` instead of being streamed.
use crate::constants::XML_ATTRIBUTES_KEY;
use crate::error::AppError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use serde_json::{Map, Value};

/// A parsed XML element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct XmlElement {
    /// Qualified name as written in the document, e.g. `SOAP-ENV:Body`
    pub name: String,
    /// Attributes in document order, namespace declarations included
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
    /// Concatenated text and CDATA content as written. Indentation between
    /// child elements is dropped.
    pub text: String,
}

impl XmlElement {
    /// Parses `input` into its root element.
    ///
    /// Fails on empty input, unbalanced tags, text outside the root and
    /// documents with more than one root.
    pub fn parse(input: &str) -> Result<XmlElement, AppError> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Self::open(&start)?),
                Event::Empty(start) => {
                    let element = Self::open(&start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        AppError::Deserialization("unexpected closing tag".to_string())
                    })?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| AppError::Deserialization(e.to_string()))?;
                    Self::push_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    let text = std::str::from_utf8(&data)
                        .map_err(|e| AppError::Deserialization(e.to_string()))?;
                    Self::push_text(&mut stack, text)?;
                }
                Event::Eof => break,
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(AppError::Deserialization(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| AppError::Deserialization("document has no root element".to_string()))
    }

    fn open(start: &BytesStart<'_>) -> Result<XmlElement, AppError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| AppError::Deserialization(e.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| AppError::Deserialization(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| AppError::Deserialization(e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| AppError::Deserialization(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(XmlElement {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<(), AppError> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(element);
            return Ok(());
        }
        if root.is_some() {
            return Err(AppError::Deserialization(
                "document has more than one root element".to_string(),
            ));
        }
        *root = Some(element);
        Ok(())
    }

    fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), AppError> {
        match stack.last_mut() {
            Some(current) => {
                current.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(AppError::Deserialization(
                "text outside of the root element".to_string(),
            )),
        }
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// First child with the given local name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// All children with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// Value of an attribute, matched on its local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local(key) == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text content of the element
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the element has neither children, attributes nor text
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.plain_attributes().next().is_none() && self.text.is_empty()
    }

    /// Converts the element's content to JSON.
    ///
    /// The element's own name is dropped. Children become keys, repeated
    /// children become arrays and unprefixed attributes are collected under
    /// `@attributes`. A leaf with text becomes a string and an empty leaf an
    /// empty object. All scalar values stay strings.
    pub fn to_value(&self) -> Value {
        let attributes: Map<String, Value> = self
            .plain_attributes()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        if self.children.is_empty() && attributes.is_empty() {
            return if self.text.is_empty() {
                Value::Object(Map::new())
            } else {
                Value::String(self.text.clone())
            };
        }

        let mut object = Map::new();
        if !attributes.is_empty() {
            object.insert(XML_ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
        }

        if self.children.is_empty() {
            if !self.text.is_empty() {
                object.insert("0".to_string(), Value::String(self.text.clone()));
            }
            return Value::Object(object);
        }

        for child in &self.children {
            let value = child.to_value();
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

    /// Attributes that are neither namespace declarations nor prefixed
    fn plain_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .filter(|(key, _)| !key.starts_with("xmlns") && !key.contains(':'))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Strips the namespace prefix from a qualified name
pub(crate) fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
