//! Facade bundling the marshaller operations with their limits.

use crate::decoder::{self, DecodeMode};
use crate::encoder;
use crate::error::{DecodeError, EncodeError, JsonResult};
use guest_config::JsonLimits;
use guest_vm::{DynamicValue, ValueStack};

/// Encodes and decodes guest values under a fixed set of limits.
///
/// The codec holds no per-call state; every operation builds its own buffer
/// and cycle guard.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    limits: JsonLimits,
}

impl JsonCodec {
    pub fn new(limits: JsonLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &JsonLimits {
        &self.limits
    }

    /// Encodes a single value.
    pub fn encode_one(&self, value: &DynamicValue, json_form: bool) -> Result<Vec<u8>, EncodeError> {
        encoder::encode_one(value, json_form, &self.limits).map_err(|err| {
            log::debug!("encode of {} value failed: {}", value.kind(), err);
            err
        })
    }

    /// Encodes a run of values; see [`encoder::encode_range`].
    pub fn encode_range(&self, values: &[DynamicValue], json_form: bool) -> Result<Vec<u8>, EncodeError> {
        encoder::encode_range(values, json_form, &self.limits).map_err(|err| {
            log::debug!("encode of {} values failed: {}", values.len(), err);
            err
        })
    }

    /// Encodes the values at 1-based stack positions `start..=end`.
    pub fn encode_stack_range(
        &self,
        stack: &ValueStack,
        start: usize,
        end: usize,
        json_form: bool,
    ) -> JsonResult<Vec<u8>> {
        let values = stack.range(start, end)?;
        Ok(self.encode_range(values, json_form)?)
    }

    /// Decodes one value.
    pub fn decode(&self, text: &[u8], mode: DecodeMode) -> Result<DynamicValue, DecodeError> {
        decoder::decode(text, mode, &self.limits).map_err(|err| {
            log::debug!("decode of {} bytes failed: {}", text.len(), err);
            err
        })
    }

    /// Decodes one value onto `stack`.
    pub fn decode_onto(
        &self,
        stack: &mut ValueStack,
        text: &[u8],
        mode: DecodeMode,
    ) -> Result<(), DecodeError> {
        let value = self.decode(text, mode)?;
        stack.push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonError;
    use guest_vm::VmError;

    #[test]
    fn test_stack_range_encoding() {
        let stack = ValueStack::from_values(vec![
            DynamicValue::from("skip"),
            DynamicValue::from(1),
            DynamicValue::from(true),
        ]);
        let codec = JsonCodec::default();
        assert_eq!(codec.encode_stack_range(&stack, 2, 3, true).unwrap(), b"[1,true]");
        assert_eq!(codec.encode_stack_range(&stack, 3, 3, true).unwrap(), b"true");
        assert!(matches!(
            codec.encode_stack_range(&stack, 2, 5, true),
            Err(JsonError::Stack(VmError::StackIndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_decode_onto() {
        let codec = JsonCodec::default();
        let mut stack = ValueStack::new();
        codec.decode_onto(&mut stack, b"\"x\"", DecodeMode::STRICT).unwrap();
        assert_eq!(stack.peek().unwrap(), &DynamicValue::from("x"));
    }
}
