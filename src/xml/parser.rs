//! Markup parser with diagnostic aggregation
//!
//! Recoverable faults (mismatched closing tags, duplicate attributes, bad
//! entities) are recorded and parsing continues, so one pass over a malformed
//! document reports every fault it can reach. `parse` fails whenever the
//! diagnostic list is non-empty.

use indexmap::IndexMap;

use crate::error::{Diagnostic, Error, Result, Span};
use crate::lexer::Cursor;
use crate::xml::model::{Content, Document, Element};

/// Markup parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over raw bytes
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            diagnostics: Vec::new(),
        }
    }

    /// Parse a document.
    ///
    /// Diagnostic state is scoped to this call; nothing leaks into the next
    /// parse.
    pub fn parse(&mut self) -> Result<Document> {
        self.diagnostics.clear();

        self.cursor.skip_whitespace();
        let root = self.parse_element();

        self.cursor.skip_whitespace();
        while !self.cursor.is_eof() {
            if self.lookahead(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->");
                self.cursor.skip_whitespace();
                continue;
            }
            self.record_here("content after document root");
            break;
        }

        match root {
            Some(root) if self.diagnostics.is_empty() => Ok(Document { root }),
            _ => Err(Error::Parse(std::mem::take(&mut self.diagnostics))),
        }
    }

    // None means an unrecoverable fault; the diagnostic is already recorded.
    fn parse_element(&mut self) -> Option<Element> {
        if !self.cursor.consume(b'<') {
            self.record_here("expected element");
            return None;
        }

        if self.cursor.current() == Some(b'?') {
            self.cursor.advance();
            self.skip_until(b"?>");
            self.cursor.skip_whitespace();
            return self.parse_element();
        }

        if self.cursor.current() == Some(b'!') {
            if self.lookahead(b"!--") {
                self.cursor.advance_by(3);
                self.skip_until(b"-->");
            } else {
                self.skip_until(b">");
            }
            self.cursor.skip_whitespace();
            return self.parse_element();
        }

        if self.cursor.current() == Some(b'/') {
            self.record_here("unexpected closing tag");
            return None;
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            if !self.cursor.consume(b'>') {
                self.record_here("expected '>' after '/'");
                return None;
            }
            return Some(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        if !self.cursor.consume(b'>') {
            self.record_here("expected '>' to close opening tag");
            return None;
        }

        let mut children = Vec::new();
        loop {
            if self.cursor.is_eof() {
                self.record_here("unterminated element");
                return None;
            }

            if self.lookahead(b"</") {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    // recoverable: treat as closing the current element
                    self.record_here("mismatched closing tag");
                }
                self.cursor.skip_whitespace();
                if !self.cursor.consume(b'>') {
                    self.record_here("expected '>' in closing tag");
                    return None;
                }
                break;
            }

            if self.lookahead(b"<![CDATA[") {
                let text = self.parse_cdata()?;
                children.push(Content::Cdata(text));
                continue;
            }

            if self.lookahead(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->");
                continue;
            }

            if self.lookahead(b"<!") {
                self.cursor.advance_by(2);
                self.skip_until(b">");
                continue;
            }

            if self.lookahead(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>");
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                let child = self.parse_element()?;
                children.push(Content::Element(child));
                continue;
            }

            if let Some(text) = self.parse_text()? {
                children.push(Content::Text(text));
            }
        }

        Some(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Option<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => {
                    self.record_here("unexpected end of input in opening tag");
                    return None;
                }
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            if !self.cursor.consume(b'=') {
                self.record_here("expected '=' after attribute name");
                return None;
            }
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                // recoverable: first occurrence wins
                self.record_here("duplicate attribute");
                continue;
            }
            attrs.insert(name, value);
        }

        Some(attrs)
    }

    fn parse_attribute_value(&mut self) -> Option<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                self.record_here("expected quoted attribute value");
                return None;
            }
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = self.bytes_to_string(raw)?;
                return Some(self.decode_entities(&text));
            }
            self.cursor.advance();
        }

        self.record_here("unterminated attribute value");
        None
    }

    fn parse_text(&mut self) -> Option<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = self.bytes_to_string(raw)?;
        let text = self.decode_entities(&text);

        if text.trim().is_empty() {
            Some(None)
        } else {
            Some(Some(text))
        }
    }

    fn parse_cdata(&mut self) -> Option<String> {
        // cursor at "<![CDATA["
        self.cursor.advance_by(9);
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.lookahead(b"]]>") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return self.bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        self.record_here("unterminated CDATA section");
        None
    }

    fn parse_name(&mut self) -> Option<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            self.record_here("expected name");
            return None;
        };
        if !is_name_start(first) {
            self.record_here("invalid name");
            return None;
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        self.bytes_to_string(raw)
    }

    fn skip_until(&mut self, pattern: &[u8]) {
        while !self.cursor.is_eof() {
            if self.lookahead(pattern) {
                self.cursor.advance_by(pattern.len());
                return;
            }
            self.cursor.advance();
        }
        self.record_here("unterminated markup");
    }

    fn lookahead(&self, pattern: &[u8]) -> bool {
        self.cursor.peek_bytes(pattern.len()) == Some(pattern)
    }

    fn bytes_to_string(&mut self, bytes: &[u8]) -> Option<String> {
        match std::str::from_utf8(bytes) {
            Ok(s) => Some(s.to_string()),
            Err(_) => {
                self.record_here("invalid utf-8");
                None
            }
        }
    }

    fn decode_entities(&mut self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '&' {
                result.push(ch);
                continue;
            }

            let mut entity = String::new();
            let mut terminated = false;
            for next in chars.by_ref() {
                if next == ';' {
                    terminated = true;
                    break;
                }
                entity.push(next);
            }

            let decoded = if terminated {
                match entity.as_str() {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => decode_numeric_entity(&entity),
                }
            } else {
                None
            };

            match decoded {
                Some(ch) => result.push(ch),
                None => {
                    // recoverable: keep the raw text
                    self.record_here("invalid entity");
                    result.push('&');
                    result.push_str(&entity);
                    if terminated {
                        result.push(';');
                    }
                }
            }
        }
        result
    }

    fn record_here(&mut self, message: &str) {
        let pos = self.cursor.position();
        self.diagnostics.push(Diagnostic::new(message, Span::at(pos)));
    }
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
