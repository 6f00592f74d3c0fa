//! JSON codec for [`Tree`]
//!
//! The tree model is stringly typed, so decoding maps JSON numbers,
//! booleans and null to their textual scalar form, and encoding always
//! quotes scalars. Non-ASCII text is emitted raw, never `\u`-escaped.

use crate::error::{Error, Result};
use crate::lexer::Cursor;
use crate::tree::{List, Map, Tree};

const MAX_DEPTH: u16 = 128;

/// Encode a tree as JSON text.
pub fn to_string(tree: &Tree) -> String {
    match tree {
        Tree::Scalar(s) => format!("\"{}\"", escape(s)),
        Tree::List(list) => {
            let items: Vec<String> = list.iter().map(to_string).collect();
            format!("[{}]", items.join(","))
        }
        Tree::Map(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape(k), to_string(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Decode JSON text into a tree.
pub fn from_str(input: &str) -> Result<Tree> {
    let mut reader = Reader {
        cursor: Cursor::new(input.as_bytes()),
    };
    reader.cursor.skip_whitespace();
    let value = reader.parse_value(0)?;
    reader.cursor.skip_whitespace();
    if !reader.cursor.is_eof() {
        return Err(reader.error_here("trailing characters after value"));
    }
    Ok(value)
}

struct Reader<'a> {
    cursor: Cursor<'a>,
}

impl Reader<'_> {
    fn parse_value(&mut self, depth: u16) -> Result<Tree> {
        if depth > MAX_DEPTH {
            return Err(self.error_here("maximum nesting depth exceeded"));
        }
        self.cursor.skip_whitespace();
        match self.cursor.current() {
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => Ok(Tree::Scalar(self.parse_string()?)),
            Some(b't') => self.parse_literal("true"),
            Some(b'f') => self.parse_literal("false"),
            Some(b'n') => {
                self.expect_literal("null")?;
                Ok(Tree::Scalar(String::new()))
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error_here("unexpected token")),
            None => Err(self.error_here("unexpected end of input")),
        }
    }

    fn parse_object(&mut self, depth: u16) -> Result<Tree> {
        self.cursor.advance();
        let mut map = Map::new();
        self.cursor.skip_whitespace();
        if self.cursor.consume(b'}') {
            return Ok(Tree::Map(map));
        }
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() != Some(b'"') {
                return Err(self.error_here("expected object key"));
            }
            let key = self.parse_string()?;
            self.cursor.skip_whitespace();
            if !self.cursor.consume(b':') {
                return Err(self.error_here("expected ':' after object key"));
            }
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);
            self.cursor.skip_whitespace();
            if self.cursor.consume(b',') {
                continue;
            }
            if self.cursor.consume(b'}') {
                return Ok(Tree::Map(map));
            }
            return Err(self.error_here("expected ',' or '}' in object"));
        }
    }

    fn parse_array(&mut self, depth: u16) -> Result<Tree> {
        self.cursor.advance();
        let mut list = List::new();
        self.cursor.skip_whitespace();
        if self.cursor.consume(b']') {
            return Ok(Tree::List(list));
        }
        loop {
            let value = self.parse_value(depth + 1)?;
            list.push(value);
            self.cursor.skip_whitespace();
            if self.cursor.consume(b',') {
                continue;
            }
            if self.cursor.consume(b']') {
                return Ok(Tree::List(list));
            }
            return Err(self.error_here("expected ',' or ']' in array"));
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        self.cursor.advance(); // opening quote
        let mut out = String::new();
        loop {
            match self.cursor.current() {
                None => return Err(self.error_here("unterminated string")),
                Some(b'"') => {
                    self.cursor.advance();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.cursor.advance();
                    let escaped = match self.cursor.current() {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'n') => '\n',
                        Some(b'r') => '\r',
                        Some(b't') => '\t',
                        Some(b'b') => '\x08',
                        Some(b'f') => '\x0C',
                        Some(b'u') => {
                            self.cursor.advance();
                            out.push(self.parse_unicode_escape()?);
                            continue;
                        }
                        _ => return Err(self.error_here("invalid escape sequence")),
                    };
                    out.push(escaped);
                    self.cursor.advance();
                }
                Some(b) if b < 0x80 => {
                    out.push(char::from(b));
                    self.cursor.advance();
                }
                Some(_) => {
                    // multi-byte utf-8 run
                    let start = self.cursor.pos();
                    while matches!(self.cursor.current(), Some(b) if b >= 0x80) {
                        self.cursor.advance();
                    }
                    let raw = self.cursor.slice_from(start);
                    match std::str::from_utf8(raw) {
                        Ok(s) => out.push_str(s),
                        Err(_) => return Err(self.error_here("invalid utf-8 in string")),
                    }
                }
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.parse_hex4()?;
        // surrogate pairs arrive as two consecutive \uXXXX escapes
        if (0xD800..=0xDBFF).contains(&first) {
            if self.cursor.consume(b'\\') && self.cursor.consume(b'u') {
                let second = self.parse_hex4()?;
                if (0xDC00..=0xDFFF).contains(&second) {
                    let combined =
                        0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                    return char::from_u32(combined)
                        .ok_or_else(|| self.error_here("invalid unicode escape"));
                }
            }
            return Err(self.error_here("unpaired surrogate escape"));
        }
        char::from_u32(first).ok_or_else(|| self.error_here("invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let start = self.cursor.pos();
        for _ in 0..4 {
            match self.cursor.current() {
                Some(b) if b.is_ascii_hexdigit() => self.cursor.advance(),
                _ => return Err(self.error_here("invalid unicode escape")),
            }
        }
        let raw = self.cursor.slice_from(start);
        let text = std::str::from_utf8(raw)
            .map_err(|_| self.error_here("invalid unicode escape"))?;
        u32::from_str_radix(text, 16).map_err(|_| self.error_here("invalid unicode escape"))
    }

    fn parse_number(&mut self) -> Result<Tree> {
        let start = self.cursor.pos();
        while matches!(
            self.cursor.current(),
            Some(b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9')
        ) {
            self.cursor.advance();
        }
        let raw = self.cursor.slice_from(start);
        let text = std::str::from_utf8(raw)
            .map_err(|_| self.error_here("invalid number"))?
            .to_string();
        if text.parse::<f64>().is_err() {
            return Err(self.error_here("invalid number"));
        }
        Ok(Tree::Scalar(text))
    }

    fn parse_literal(&mut self, literal: &'static str) -> Result<Tree> {
        self.expect_literal(literal)?;
        Ok(Tree::Scalar(literal.to_string()))
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<()> {
        for expected in literal.bytes() {
            if !self.cursor.consume(expected) {
                return Err(self.error_here("invalid literal"));
            }
        }
        Ok(())
    }

    fn error_here(&self, message: &str) -> Error {
        Error::parse_at(message, self.cursor.position())
    }
}
