//! Reader for PHP `serialize()` output.
//!
//! Strings are byte-counted, so decoding works on raw bytes and only
//! requires each string payload to be valid UTF-8. Objects decode to maps
//! with the class name dropped; protected (`\0*\0name`) and private
//! (`\0Class\0name`) property prefixes are stripped.

use std::path::Path;

use super::{Format, FormatReader, into_document_root};
use crate::constants::MAX_NESTING_DEPTH;
use crate::error::ConfigError;
use crate::value::ConfigValue;

/// Reads `.serialize` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializedReader;

impl FormatReader for SerializedReader {
    fn format(&self) -> Format {
        Format::Serialized
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let mut decoder = Decoder {
            src: bytes,
            pos: 0,
            depth: 0,
        };
        let value = decoder.value().map_err(|(offset, message)| {
            ConfigError::parse(path, Format::Serialized, format!("at byte {offset}: {message}"))
        })?;
        let rest = &bytes[decoder.pos..];
        if !rest.iter().all(u8::is_ascii_whitespace) {
            return Err(ConfigError::parse(
                path,
                Format::Serialized,
                format!("at byte {}: unexpected trailing data", decoder.pos),
            ));
        }
        into_document_root(value, path, Format::Serialized)
    }
}

type DecodeResult<T> = Result<T, (usize, String)>;

struct Decoder<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn value(&mut self) -> DecodeResult<ConfigValue> {
        let tag = self.next_byte()?;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(ConfigValue::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let raw = self.until(b';')?;
                match raw {
                    "0" => Ok(ConfigValue::Bool(false)),
                    "1" => Ok(ConfigValue::Bool(true)),
                    other => self.fail(format!("invalid boolean `{other}`")),
                }
            }
            b'i' => {
                self.expect(b':')?;
                let raw = self.until(b';')?;
                raw.parse::<i64>()
                    .map(ConfigValue::Integer)
                    .or_else(|_| self.fail(format!("invalid integer `{raw}`")))
            }
            b'd' => {
                self.expect(b':')?;
                let raw = self.until(b';')?;
                let parsed = match raw {
                    "INF" => Ok(f64::INFINITY),
                    "-INF" => Ok(f64::NEG_INFINITY),
                    "NAN" => Ok(f64::NAN),
                    other => other.parse::<f64>(),
                };
                parsed
                    .map(ConfigValue::Float)
                    .or_else(|_| self.fail(format!("invalid float `{raw}`")))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.counted_string()?;
                self.expect(b';')?;
                Ok(ConfigValue::String(s))
            }
            b'a' => {
                self.expect(b':')?;
                let entries = self.entries(false)?;
                Ok(ConfigValue::from_php_entries(entries))
            }
            b'O' => {
                self.expect(b':')?;
                let _class = self.counted_string()?;
                self.expect(b':')?;
                let entries = self.entries(true)?;
                Ok(ConfigValue::Map(entries.into_iter().collect()))
            }
            other => {
                self.pos -= 1;
                self.fail(format!("unsupported type tag `{}`", other as char))
            }
        }
    }

    /// `<count>:{key;value...}` for arrays and objects.
    fn entries(&mut self, object: bool) -> DecodeResult<Vec<(String, ConfigValue)>> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.fail("nesting too deep");
        }
        self.depth += 1;
        let entries = self.entries_inner(object);
        self.depth -= 1;
        entries
    }

    fn entries_inner(&mut self, object: bool) -> DecodeResult<Vec<(String, ConfigValue)>> {
        let count: usize = {
            let raw = self.until(b':')?;
            raw.parse::<usize>()
                .or_else(|_| self.fail(format!("invalid element count `{raw}`")))?
        };
        self.expect(b'{')?;
        let mut entries = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let key = match self.value()? {
                ConfigValue::String(s) if object => strip_property_visibility(s),
                ConfigValue::String(s) => s,
                ConfigValue::Integer(n) => n.to_string(),
                _ => return self.fail("array keys must be strings or integers"),
            };
            let value = self.value()?;
            entries.push((key, value));
        }
        self.expect(b'}')?;
        Ok(entries)
    }

    /// `<len>:"<bytes>"`
    fn counted_string(&mut self) -> DecodeResult<String> {
        let len: usize = {
            let raw = self.until(b':')?;
            raw.parse::<usize>()
                .or_else(|_| self.fail(format!("invalid string length `{raw}`")))?
        };
        self.expect(b'"')?;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.src.len())
            .ok_or((start, "string length exceeds input".to_string()))?;
        let payload = std::str::from_utf8(&self.src[start..end])
            .map_err(|_| (start, "string is not valid UTF-8".to_string()))?
            .to_string();
        self.pos = end;
        self.expect(b'"')?;
        Ok(payload)
    }

    /// Consume bytes up to (not including) `delim`, then skip the delimiter.
    fn until(&mut self, delim: u8) -> DecodeResult<&'a str> {
        let src: &'a [u8] = self.src;
        let start = self.pos;
        let offset = src[start..]
            .iter()
            .position(|b| *b == delim)
            .ok_or((start, format!("expected `{}`", delim as char)))?;
        self.pos = start + offset + 1;
        std::str::from_utf8(&src[start..start + offset])
            .map_err(|_| (start, "invalid UTF-8".to_string()))
    }

    fn next_byte(&mut self) -> DecodeResult<u8> {
        let byte = *self
            .src
            .get(self.pos)
            .ok_or((self.pos, "unexpected end of input".to_string()))?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> DecodeResult<()> {
        let at = self.pos;
        match self.next_byte()? {
            b if b == expected => Ok(()),
            b => Err((at, format!("expected `{}`, found `{}`", expected as char, b as char))),
        }
    }

    fn fail<T>(&self, message: impl Into<String>) -> DecodeResult<T> {
        Err((self.pos, message.into()))
    }
}

fn strip_property_visibility(name: String) -> String {
    if let Some(rest) = name.strip_prefix('\0') {
        if let Some(idx) = rest.find('\0') {
            return rest[idx + 1..].to_string();
        }
    }
    name
}
