//! XML reader backed by `quick-xml`.
//!
//! The document element itself is dropped and its children become the
//! top-level keys. Repeated sibling names collapse into a list, text-only
//! elements become strings, attributes are kept under `@attributes`, and
//! empty elements become empty maps. Text mixed with child elements is ignored.

use std::collections::HashSet;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Format, FormatReader, utf8};
use crate::constants::XML_ATTRIBUTES_KEY;
use crate::error::ConfigError;
use crate::value::{ConfigMap, ConfigValue};

/// Reads `.xml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlReader;

impl FormatReader for XmlReader {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let text = utf8(bytes, path, Format::Xml)?;
        parse_document(text).map_err(|message| ConfigError::parse(path, Format::Xml, message))
    }
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    attributes: ConfigMap,
    children: ConfigMap,
    // Child names that occurred more than once and were collapsed into a list.
    repeated: HashSet<String>,
    text: String,
}

impl OpenElement {
    fn new(start: &BytesStart<'_>) -> Result<Self, String> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = ConfigMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            attributes.insert(key, ConfigValue::String(value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: ConfigMap::new(),
            repeated: HashSet::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: ConfigValue) {
        let Some(existing) = self.children.get_mut(&name) else {
            self.children.insert(name, value);
            return;
        };
        if self.repeated.contains(&name) {
            if let ConfigValue::List(items) = existing {
                items.push(value);
            }
        } else {
            let first = std::mem::take(existing);
            *existing = ConfigValue::List(vec![first, value]);
            self.repeated.insert(name);
        }
    }

    fn finish(self) -> ConfigValue {
        let text = self.text.trim();
        if self.children.is_empty() && self.attributes.is_empty() {
            return if text.is_empty() {
                ConfigValue::empty_map()
            } else {
                ConfigValue::String(text.to_string())
            };
        }

        let mut map = ConfigMap::new();
        if !self.attributes.is_empty() {
            map.insert(
                XML_ATTRIBUTES_KEY.to_string(),
                ConfigValue::Map(self.attributes),
            );
        }
        if self.children.is_empty() && !text.is_empty() {
            map.insert("0".to_string(), ConfigValue::String(text.to_string()));
        }
        map.extend(self.children);
        ConfigValue::Map(map)
    }
}

fn parse_document(text: &str) -> Result<ConfigValue, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<ConfigValue> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err("multiple root elements".to_string());
                }
                stack.push(OpenElement::new(&start)?);
            }
            Event::Empty(start) => {
                let element = OpenElement::new(&start)?;
                close(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                close(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = t.unescape().map_err(|e| e.to_string())?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document: unclosed element".to_string());
    }
    match root {
        Some(ConfigValue::Map(map)) => Ok(ConfigValue::Map(map)),
        Some(_) => Ok(ConfigValue::empty_map()),
        None => Err("document has no root element".to_string()),
    }
}

fn close(
    stack: &mut [OpenElement],
    root: &mut Option<ConfigValue>,
    element: OpenElement,
) -> Result<(), String> {
    let name = element.name.clone();
    let value = element.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => {
            if root.is_some() {
                return Err("multiple root elements".to_string());
            }
            *root = Some(value);
        }
    }
    Ok(())
}
