//! Recursive-descent decoder from JSON text to guest values.
//!
//! The grammar is deliberately tolerant: literals are case-insensitive, a
//! trailing separator before a closing bracket is accepted, and an object
//! entry without a `:` is stored at the next positional index.

use crate::error::DecodeError;
use guest_config::JsonLimits;
use guest_vm::{Composite, DynamicValue, Number, ValueStack};

/// Decoding flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeMode {
    /// Reject trailing input after the top-level value and non-string
    /// object keys.
    pub strict: bool,
}

impl DecodeMode {
    pub const STRICT: Self = Self { strict: true };
    pub const LENIENT: Self = Self { strict: false };
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    mode: DecodeMode,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8], mode: DecodeMode, max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            mode,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn malformed(&self, reason: &'static str) -> DecodeError {
        DecodeError::MalformedJson {
            offset: self.pos,
            reason,
        }
    }

    fn starts_with_literal(&self, literal: &[u8]) -> bool {
        self.input
            .get(self.pos..self.pos + literal.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(literal))
    }

    fn parse_value(&mut self) -> Result<DynamicValue, DecodeError> {
        self.skip_whitespace();
        let value = match self.peek() {
            None => return Err(self.malformed("unexpected end of input")),
            Some(b'"') => self.parse_string()?,
            Some(b'0'..=b'9' | b'-' | b'+') => self.parse_number()?,
            Some(b'{') => self.parse_object()?,
            Some(b'[') => self.parse_array()?,
            Some(_) => self.parse_literal()?,
        };
        self.skip_whitespace();
        Ok(value)
    }

    fn parse_literal(&mut self) -> Result<DynamicValue, DecodeError> {
        if self.starts_with_literal(b"true") {
            self.pos += 4;
            Ok(DynamicValue::Boolean(true))
        } else if self.starts_with_literal(b"false") {
            self.pos += 5;
            Ok(DynamicValue::Boolean(false))
        } else if self.starts_with_literal(b"null") {
            self.pos += 4;
            Ok(DynamicValue::Nil)
        } else {
            Err(self.malformed("unexpected character"))
        }
    }

    fn parse_string(&mut self) -> Result<DynamicValue, DecodeError> {
        self.pos += 1;
        let mut bytes = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.malformed("unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => {
                    self.pos += 1;
                    let unescaped = match self.peek() {
                        None => return Err(self.malformed("unterminated escape sequence")),
                        Some(b't') => b'\t',
                        Some(b'n') => b'\n',
                        Some(b'b') => 0x08,
                        Some(b'f') => 0x0c,
                        Some(b'r') => b'\r',
                        Some(other) => other,
                    };
                    bytes.push(unescaped);
                }
                Some(byte) => bytes.push(byte),
            }
            self.pos += 1;
        }
        self.pos += 1;
        Ok(DynamicValue::String(bytes))
    }

    fn parse_number(&mut self) -> Result<DynamicValue, DecodeError> {
        let start = self.pos;
        self.pos += 1;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.peek() {
            self.pos += 1;
        }
        let value = std::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or(DecodeError::MalformedJson {
                offset: start,
                reason: "invalid number",
            })?;
        Ok(DynamicValue::Number(Number::Float(value)))
    }

    fn enter_nested(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                limit: self.max_depth,
                offset: self.pos,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<DynamicValue, DecodeError> {
        self.enter_nested()?;
        self.pos += 1;
        let array = Composite::new();
        let mut index: i64 = 1;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => break,
                None => return Err(self.malformed("unterminated array")),
                Some(_) => {}
            }
            let item = self.parse_value()?;
            array.set_index(index, item);
            index += 1;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                _ => return Err(self.malformed("expected ',' or ']'")),
            }
        }
        self.pos += 1;
        self.depth -= 1;
        Ok(DynamicValue::Composite(array))
    }

    fn parse_object(&mut self) -> Result<DynamicValue, DecodeError> {
        self.enter_nested()?;
        self.pos += 1;
        let object = Composite::new();
        let mut position: i64 = 1;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => break,
                None => return Err(self.malformed("unterminated object")),
                Some(_) => {}
            }
            let entry_offset = self.pos;
            let provisional = self.parse_value()?;
            if self.peek() == Some(b':') {
                if self.mode.strict && !provisional.is_string() {
                    return Err(DecodeError::NonStringKey {
                        offset: entry_offset,
                    });
                }
                self.pos += 1;
                let value = self.parse_value()?;
                object
                    .set(provisional, value)
                    .map_err(|_| DecodeError::MalformedJson {
                        offset: entry_offset,
                        reason: "invalid object key",
                    })?;
            } else {
                object.set_index(position, provisional);
                position += 1;
            }
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.malformed("expected ',' or '}'")),
            }
        }
        self.pos += 1;
        self.depth -= 1;
        Ok(DynamicValue::Composite(object))
    }
}

/// Decodes one value from `text`.
///
/// In strict mode anything but whitespace after the value is rejected; in
/// lenient mode it is ignored.
pub fn decode(text: &[u8], mode: DecodeMode, limits: &JsonLimits) -> Result<DynamicValue, DecodeError> {
    let mut decoder = Decoder::new(text, mode, limits.max_depth);
    let value = decoder.parse_value()?;
    if mode.strict && decoder.pos < text.len() {
        return Err(DecodeError::TrailingInput {
            offset: decoder.pos,
        });
    }
    Ok(value)
}

/// Decodes one value from `text` and pushes it onto `stack`.
pub fn decode_onto(
    stack: &mut ValueStack,
    text: &[u8],
    mode: DecodeMode,
    limits: &JsonLimits,
) -> Result<(), DecodeError> {
    let value = decode(text, mode, limits)?;
    stack.push(value);
    Ok(())
}
