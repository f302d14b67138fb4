//! PHP array literal reader.
//!
//! Accepts files of the form `<?php return [ ... ];` (or `array( ... )`),
//! which is how PHP projects commonly ship environment files. Only literal
//! values are understood: strings, numbers, booleans, null and nested arrays.
//! Anything that would need a PHP interpreter (constants, function calls,
//! concatenation) is a parse error.

use std::path::Path;

use super::{Format, FormatReader, into_document_root, utf8};
use crate::constants::MAX_NESTING_DEPTH;
use crate::error::ConfigError;
use crate::value::ConfigValue;

/// Reads `.php` files containing a returned array literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpArrayReader;

impl FormatReader for PhpArrayReader {
    fn format(&self) -> Format {
        Format::PhpArray
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<ConfigValue, ConfigError> {
        let text = utf8(bytes, path, Format::PhpArray)?;
        let value = Parser::new(text).parse_file().map_err(|(offset, message)| {
            ConfigError::parse(path, Format::PhpArray, format!("at byte {offset}: {message}"))
        })?;
        into_document_root(value, path, Format::PhpArray)
    }
}

type ParseResult<T> = Result<T, (usize, String)>;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn parse_file(&mut self) -> ParseResult<ConfigValue> {
        self.skip_bom();
        self.skip_ws();
        if !self.eat_keyword("<?php") {
            return self.error("expected `<?php` opening tag");
        }
        self.skip_trivia();
        while self.eat_keyword("declare") {
            self.skip_declare()?;
            self.skip_trivia();
        }
        if !self.eat_keyword("return") {
            return self.error("expected `return` statement");
        }
        self.skip_trivia();
        let value = self.parse_value()?;
        self.skip_trivia();
        self.eat(';');
        self.skip_trivia();
        if self.eat_keyword("?>") {
            self.skip_ws();
        }
        if self.pos < self.src.len() {
            return self.error("unexpected trailing content");
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> ParseResult<ConfigValue> {
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                self.parse_array(']')
            }
            Some('\'') => self.parse_single_quoted().map(ConfigValue::String),
            Some('"') => self.parse_double_quoted().map(ConfigValue::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(ConfigValue::Bool(true)),
                    "false" => Ok(ConfigValue::Bool(false)),
                    "null" => Ok(ConfigValue::Null),
                    "array" => {
                        self.skip_trivia();
                        if !self.eat('(') {
                            return self.error("expected `(` after `array`");
                        }
                        self.parse_array(')')
                    }
                    other => self.error(format!("unsupported expression `{other}`")),
                }
            }
            Some(c) => self.error(format!("unexpected character `{c}`")),
            None => self.error("unexpected end of file"),
        }
    }

    /// `declare(...)` directives carry no data; the keyword is already consumed.
    fn skip_declare(&mut self) -> ParseResult<()> {
        self.skip_trivia();
        if !self.eat('(') {
            return self.error("expected `(` after `declare`");
        }
        match self.src[self.pos..].find(')') {
            Some(end) => self.pos += end + 1,
            None => return self.error("unterminated `declare`"),
        }
        self.skip_trivia();
        if !self.eat(';') {
            return self.error("expected `;` after `declare(...)`");
        }
        Ok(())
    }

    /// Parse array entries up to `close`; the opening bracket is already consumed.
    fn parse_array(&mut self, close: char) -> ParseResult<ConfigValue> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.error("nesting too deep");
        }
        self.depth += 1;
        let array = self.parse_array_entries(close);
        self.depth -= 1;
        array
    }

    fn parse_array_entries(&mut self, close: char) -> ParseResult<ConfigValue> {
        let mut entries: Vec<(String, ConfigValue)> = Vec::new();
        let mut next_index: i64 = 0;

        loop {
            self.skip_trivia();
            if self.eat(close) {
                break;
            }

            let first = self.parse_value()?;
            self.skip_trivia();
            let (key, value) = if self.eat_keyword("=>") {
                self.skip_trivia();
                let value = self.parse_value()?;
                let key = self.array_key(first)?;
                if let Ok(n) = key.parse::<i64>() {
                    next_index = next_index.max(n + 1);
                }
                (key, value)
            } else {
                let key = next_index.to_string();
                next_index += 1;
                (key, first)
            };

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }

            self.skip_trivia();
            if self.eat(',') {
                continue;
            }
            self.skip_trivia();
            if self.eat(close) {
                break;
            }
            return self.error(format!("expected `,` or `{close}`"));
        }

        Ok(ConfigValue::from_php_entries(entries))
    }

    fn array_key(&self, key: ConfigValue) -> ParseResult<String> {
        match key {
            ConfigValue::String(s) => Ok(s),
            ConfigValue::Integer(n) => Ok(n.to_string()),
            ConfigValue::Float(f) => Ok((f.trunc() as i64).to_string()),
            ConfigValue::Bool(b) => Ok(if b { "1" } else { "0" }.to_string()),
            ConfigValue::Null => Ok(String::new()),
            _ => self.error("array keys must be scalars"),
        }
    }

    fn parse_number(&mut self) -> ParseResult<ConfigValue> {
        let start = self.pos;
        let text = self.take_while(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | '_')
        });
        let cleaned = text.replace('_', "");
        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let radix_value = if let Some(hex) = digits.strip_prefix("0x").or(digits.strip_prefix("0X")) {
            Some(i64::from_str_radix(hex, 16))
        } else if let Some(bin) = digits.strip_prefix("0b").or(digits.strip_prefix("0B")) {
            Some(i64::from_str_radix(bin, 2))
        } else if let Some(oct) = digits.strip_prefix("0o").or(digits.strip_prefix("0O")) {
            Some(i64::from_str_radix(oct, 8))
        } else if digits.len() > 1
            && digits.starts_with('0')
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            // PHP reads a leading zero as octal: `0755` is 493.
            Some(i64::from_str_radix(&digits[1..], 8))
        } else {
            None
        };
        if let Some(parsed) = radix_value {
            return parsed
                .map(|n| ConfigValue::Integer(if negative { -n } else { n }))
                .map_err(|_| (start, format!("invalid number `{text}`")));
        }

        if let Ok(n) = cleaned.parse::<i64>() {
            return Ok(ConfigValue::Integer(n));
        }
        cleaned
            .parse::<f64>()
            .map(ConfigValue::Float)
            .map_err(|_| (start, format!("invalid number `{text}`")))
    }

    fn parse_single_quoted(&mut self) -> ParseResult<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\'' => return Ok(out),
                '\\' => match self.peek() {
                    Some(next @ ('\'' | '\\')) => {
                        self.pos += 1;
                        out.push(next);
                    }
                    _ => out.push('\\'),
                },
                other => out.push(other),
            }
        }
        Err((start, "unterminated string".to_string()))
    }

    fn parse_double_quoted(&mut self) -> ParseResult<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Ok(out),
                '$' if self.peek().is_some_and(|n| n.is_ascii_alphabetic() || n == '_' || n == '{') => {
                    return Err((self.pos - 1, "string interpolation is not supported".to_string()));
                }
                '\\' => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('v') => out.push('\u{0B}'),
                    Some('f') => out.push('\u{0C}'),
                    Some('0') => out.push('\0'),
                    Some('e') => out.push('\u{1B}'),
                    Some(esc @ ('\\' | '"' | '$')) => out.push(esc),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                other => out.push(other),
            }
        }
        Err((start, "unterminated string".to_string()))
    }

    fn skip_bom(&mut self) {
        if self.src[self.pos..].starts_with('\u{FEFF}') {
            self.pos += '\u{FEFF}'.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Skip whitespace and `//`, `#`, `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_ws();
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                let line_end = rest.find('\n').unwrap_or(rest.len());
                self.pos += line_end;
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.src[self.pos..];
        if rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
        {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src: &'a str = self.src;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &src[start..self.pos]
    }

    fn error<T>(&self, message: impl Into<String>) -> ParseResult<T> {
        Err((self.pos, message.into()))
    }
}
