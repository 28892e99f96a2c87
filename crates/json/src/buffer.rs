//! Growable output buffer for the encoder.
//!
//! Capacity is tracked explicitly and only ever doubles, clamped to the
//! configured ceiling. Growth always happens before the bytes are written.

use crate::error::EncodeError;

/// Output text of one encode call.
#[derive(Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
    capacity: usize,
    max_capacity: usize,
}

impl ByteBuffer {
    /// Creates a buffer holding `initial_capacity` bytes, allowed to grow up
    /// to `max_capacity`.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Result<Self, EncodeError> {
        let capacity = initial_capacity.max(1);
        if capacity > max_capacity {
            return Err(EncodeError::AllocationFailure {
                requested: capacity,
            });
        }
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| EncodeError::AllocationFailure {
                requested: capacity,
            })?;
        Ok(Self {
            data,
            capacity,
            max_capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn ensure(&mut self, additional: usize) -> Result<(), EncodeError> {
        let required = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(EncodeError::AllocationFailure {
                requested: usize::MAX,
            })?;
        if required <= self.capacity {
            return Ok(());
        }
        if required > self.max_capacity {
            return Err(EncodeError::AllocationFailure {
                requested: required,
            });
        }

        let mut capacity = self.capacity;
        while capacity < required {
            capacity = capacity.saturating_mul(2);
        }
        let capacity = capacity.min(self.max_capacity);

        self.data
            .try_reserve_exact(capacity - self.data.len())
            .map_err(|_| EncodeError::AllocationFailure {
                requested: capacity,
            })?;
        log::trace!("output buffer grown {} -> {} bytes", self.capacity, capacity);
        self.capacity = capacity;
        Ok(())
    }

    /// Appends raw bytes.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.ensure(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Appends `text`, escaping quote, backslash, tab, newline, backspace,
    /// form feed and carriage return. Every other byte is copied as is.
    pub fn append_escaped(&mut self, text: &[u8]) -> Result<(), EncodeError> {
        for &byte in text {
            let escaped = match byte {
                b'"' => Some(b'"'),
                b'\\' => Some(b'\\'),
                b'\t' => Some(b't'),
                b'\n' => Some(b'n'),
                0x08 => Some(b'b'),
                0x0c => Some(b'f'),
                b'\r' => Some(b'r'),
                _ => None,
            };
            match escaped {
                Some(code) => {
                    self.ensure(2)?;
                    self.data.push(b'\\');
                    self.data.push(code);
                }
                None => {
                    self.ensure(1)?;
                    self.data.push(byte);
                }
            }
        }
        Ok(())
    }

    /// Drops the last byte written, normally a trailing separator.
    pub fn trim_last(&mut self) {
        self.data.pop();
    }

    /// Hands the accumulated bytes to the caller.
    pub fn finalize(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_doubles() {
        let mut buffer = ByteBuffer::new(4, 1024).unwrap();
        buffer.append(b"abc").unwrap();
        assert_eq!(buffer.capacity(), 4);
        buffer.append(b"defgh").unwrap();
        assert_eq!(buffer.capacity(), 8);
        buffer.append(b"0123456789").unwrap();
        assert_eq!(buffer.capacity(), 32);
        assert!(buffer.len() <= buffer.capacity());
        assert_eq!(buffer.finalize(), b"abcdefgh0123456789");
    }

    #[test]
    fn test_growth_clamped_to_ceiling() {
        let mut buffer = ByteBuffer::new(8, 12).unwrap();
        buffer.append(b"0123456789").unwrap();
        assert_eq!(buffer.capacity(), 12);
        let err = buffer.append(b"abc").unwrap_err();
        assert_eq!(err, EncodeError::AllocationFailure { requested: 13 });
        assert_eq!(buffer.as_bytes(), b"0123456789");
    }

    #[test]
    fn test_initial_capacity_above_ceiling() {
        assert!(ByteBuffer::new(64, 16).is_err());
    }

    #[test]
    fn test_escape_table() {
        let mut buffer = ByteBuffer::new(2, 1024).unwrap();
        buffer
            .append_escaped(b"a\"b\\c\td\ne\x08f\x0cg\rh")
            .unwrap();
        assert_eq!(
            buffer.as_bytes(),
            br#"a\"b\\c\td\ne\bf\fg\rh"#
        );
    }

    #[test]
    fn test_other_control_bytes_pass_through() {
        let mut buffer = ByteBuffer::new(2, 1024).unwrap();
        buffer.append_escaped(b"\x01\x1f\xc3\xa9").unwrap();
        assert_eq!(buffer.as_bytes(), b"\x01\x1f\xc3\xa9");
    }

    #[test]
    fn test_trim_last() {
        let mut buffer = ByteBuffer::new(4, 64).unwrap();
        buffer.append(b"1,").unwrap();
        buffer.trim_last();
        assert_eq!(buffer.as_bytes(), b"1");
        buffer.trim_last();
        buffer.trim_last();
        assert!(buffer.is_empty());
    }
}
