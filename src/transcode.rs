//! JSON ↔ XML transcoding compatibility layer.
//!
//! The platform stores submitted records as XML: the JSON body of a POST/PUT
//! is converted to an XML document (object keys become elements, array items
//! repeat their element) and converted back to JSON when served. This module
//! reproduces that round trip so tests can verify which record shapes
//! survive it.
//!
//! The mapping is inherently lossy in documented ways:
//!
//! - XML text is untyped, so everything comes back as a string except bare
//!   `true`/`false`, which re-type as booleans.
//! - An empty element reads back as `null`, so empty-string fields collapse
//!   to absent.
//! - A single-element array collapses to a scalar on the way back (one
//!   repeated element is indistinguishable from a lone one).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{BizError, Result};

/// Whether `name` is a legal XML element name.
///
/// Dictionary keys in records become XML element names server-side, so they
/// are restricted to a leading letter or underscore followed by letters,
/// digits, `.`, `-` or `_`.
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Convert a JSON object to an XML document rooted at `root_name`.
///
/// Object keys become elements, arrays repeat their element per item,
/// scalars become text content and `null` becomes an empty element.
///
/// # Errors
///
/// Returns an error if `json` is not a JSON object, contains a key that is
/// not a valid XML name, or nests an array directly inside an array (which
/// the XML shape cannot represent).
pub fn json_to_xml(json: &str, root_name: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(map) = value else {
        return Err(BizError::XmlError(
            "top-level JSON must be an object".to_string(),
        ));
    };
    if !is_valid_xml_name(root_name) {
        return Err(BizError::InvalidKeyName(root_name.to_string()));
    }

    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root_name, &Value::Object(map))?;

    String::from_utf8(writer.into_inner())
        .map_err(|err| BizError::XmlError(err.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => {
            writer
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(|err| BizError::XmlError(err.to_string()))?;
        }
        Value::Array(items) => {
            // The element repeats per item at the caller's level.
            for item in items {
                if item.is_array() {
                    return Err(BizError::XmlError(format!(
                        "array nested directly inside array at element {name}"
                    )));
                }
                write_element(writer, name, item)?;
            }
        }
        Value::Object(map) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(|err| BizError::XmlError(err.to_string()))?;
            for (key, child) in map {
                if !is_valid_xml_name(key) {
                    return Err(BizError::InvalidKeyName(key.clone()));
                }
                write_element(writer, key, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(|err| BizError::XmlError(err.to_string()))?;
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(|err| BizError::XmlError(err.to_string()))?;
            if !text.is_empty() {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(|err| BizError::XmlError(err.to_string()))?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(|err| BizError::XmlError(err.to_string()))?;
        }
    }
    Ok(())
}

/// Intermediate node built while reading XML back.
#[derive(Default)]
struct XmlNode {
    children: Vec<(String, XmlNode)>,
    text: String,
}

impl XmlNode {
    fn into_value(self) -> Value {
        if self.children.is_empty() {
            return if self.text.is_empty() {
                Value::Null
            } else {
                coerce_scalar(self.text)
            };
        }

        let mut map = serde_json::Map::new();
        for (name, child) in self.children {
            let value = child.into_value();
            match map.get_mut(&name) {
                None => {
                    map.insert(name, value);
                }
                Some(Value::Array(existing)) => existing.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            }
        }
        Value::Object(map)
    }
}

/// Re-type bare boolean text; everything else stays a string.
fn coerce_scalar(text: String) -> Value {
    match text.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text),
    }
}

/// Convert an XML document back to JSON, dropping the root element.
///
/// Repeated sibling elements collapse to an array; an empty element becomes
/// `null`; an empty root becomes the JSON text `null`.
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn xml_to_json(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, XmlNode)> = vec![(String::new(), XmlNode::default())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push((name, XmlNode::default()));
            }
            Ok(Event::Empty(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if let Some((_, parent)) = stack.last_mut() {
                    parent.children.push((name, XmlNode::default()));
                }
            }
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|err| BizError::XmlError(err.to_string()))?;
                if let Some((_, node)) = stack.last_mut() {
                    node.text.push_str(&unescaped);
                }
            }
            Ok(Event::End(_)) => {
                // The synthetic bottom entry never has a matching end tag.
                if stack.len() > 1 {
                    if let Some((name, node)) = stack.pop() {
                        if let Some((_, parent)) = stack.last_mut() {
                            parent.children.push((name, node));
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(BizError::XmlError(err.to_string())),
        }
    }

    let (_, document) = stack.swap_remove(0);
    // Drop the root element; its children are the object.
    let value = match document.children.into_iter().next() {
        Some((_, root)) => root.into_value(),
        None => Value::Null,
    };

    Ok(serde_json::to_string(&value)?)
}

/// Serialize a record to JSON, through XML, back to JSON, and back into a
/// typed record — the full storage round trip.
///
/// # Errors
///
/// Returns an error if any conversion step fails, including a record shape
/// that does not survive the trip (see the module docs for the lossy cases).
pub fn round_trip<T>(value: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_string(value)?;
    let xml = json_to_xml(&json, "root")?;
    let json_from_xml = xml_to_json(&xml)?;
    Ok(serde_json::from_str(&json_from_xml)?)
}
