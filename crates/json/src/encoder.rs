//! Encoder from guest values to JSON text.
//!
//! Every encoded value is followed by a `,` separator; callers trim the last
//! one once a run of values is complete.

use crate::buffer::ByteBuffer;
use crate::error::EncodeError;
use crate::guard::CycleGuard;
use crate::utility::format_general;
use guest_config::JsonLimits;
use guest_vm::{Composite, DynamicValue};

/// Encoding flags threaded through every recursive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeMode {
    /// Compact JSON form: arrays are detected and nil prints as `{}`.
    pub json_form: bool,
    /// The value being encoded is an object key.
    pub is_key: bool,
}

impl EncodeMode {
    /// Mode for a value slot.
    pub fn value(json_form: bool) -> Self {
        Self {
            json_form,
            is_key: false,
        }
    }

    fn as_key(self) -> Self {
        Self {
            is_key: true,
            ..self
        }
    }

    fn as_value(self) -> Self {
        Self {
            is_key: false,
            ..self
        }
    }
}

/// Per-call encoding state. Never reused across calls.
struct Encoder {
    buffer: ByteBuffer,
    guard: Option<CycleGuard>,
    max_depth: usize,
}

impl Encoder {
    fn new(limits: &JsonLimits) -> Result<Self, EncodeError> {
        Ok(Self {
            buffer: ByteBuffer::new(limits.initial_capacity, limits.max_output_size)?,
            guard: None,
            max_depth: limits.max_depth,
        })
    }

    fn encode(&mut self, value: &DynamicValue, mode: EncodeMode) -> Result<(), EncodeError> {
        match value {
            DynamicValue::Nil => {
                if mode.json_form && !mode.is_key {
                    self.buffer.append(b"{},")
                } else {
                    self.buffer.append(b"null,")
                }
            }
            DynamicValue::Boolean(true) => self.buffer.append(b"true,"),
            DynamicValue::Boolean(false) => self.buffer.append(b"false,"),
            DynamicValue::Number(number) => {
                let text = match number.as_exact_integer() {
                    Some(integer) => integer.to_string(),
                    None => format_general(number.to_f64()),
                };
                if mode.json_form && mode.is_key {
                    self.buffer.append(b"\"")?;
                    self.buffer.append(text.as_bytes())?;
                    self.buffer.append(b"\",")
                } else {
                    self.buffer.append(text.as_bytes())?;
                    self.buffer.append(b",")
                }
            }
            DynamicValue::String(bytes) => {
                self.buffer.append(b"\"")?;
                self.buffer.append_escaped(bytes)?;
                self.buffer.append(b"\",")
            }
            DynamicValue::Composite(composite) => self.encode_composite(composite, mode),
            DynamicValue::Opaque(handle) => Err(EncodeError::UnsupportedValueKind(handle.kind())),
        }
    }

    fn encode_composite(&mut self, composite: &Composite, mode: EncodeMode) -> Result<(), EncodeError> {
        let guard = self.guard.get_or_insert_with(CycleGuard::new);
        // A cycle closing at the depth limit is still a cycle.
        if guard.contains(composite.id()) {
            return Err(EncodeError::CyclicStructure);
        }
        if guard.depth() >= self.max_depth {
            return Err(EncodeError::DepthLimitExceeded(self.max_depth));
        }
        guard.enter(composite.id());

        let result = self.encode_composite_body(composite, mode);

        if let Some(guard) = self.guard.as_mut() {
            guard.leave();
        }
        result
    }

    fn encode_composite_body(
        &mut self,
        composite: &Composite,
        mode: EncodeMode,
    ) -> Result<(), EncodeError> {
        let declared = composite.declared_len();
        let entries = composite.entries();

        if mode.json_form && declared > 0 && is_array_shaped(&entries, declared) {
            self.buffer.append(b"[")?;
            for index in 1..=declared {
                let item = composite.get_index(index as i64);
                self.encode(&item, EncodeMode::value(true))?;
            }
            self.buffer.trim_last();
            return self.buffer.append(b"],");
        }

        self.buffer.append(b"{")?;
        let start = self.buffer.len();
        for (key, value) in &entries {
            self.encode(key, mode.as_key())?;
            self.buffer.trim_last();
            self.buffer.append(b":")?;
            self.encode(value, mode.as_value())?;
        }
        if self.buffer.len() != start {
            self.buffer.trim_last();
        }
        self.buffer.append(b"},")
    }
}

/// A composite is array-shaped when its keys are exactly the integers
/// `1..=declared`, each present once.
fn is_array_shaped(entries: &[(DynamicValue, DynamicValue)], declared: usize) -> bool {
    if entries.len() != declared {
        return false;
    }
    let mut present = vec![false; declared];
    for (key, _) in entries {
        let Some(number) = key.as_number() else {
            return false;
        };
        if !number.is_integral() {
            return false;
        }
        let position = number.to_f64();
        if position < 1.0 || position > declared as f64 {
            return false;
        }
        let slot = &mut present[position as usize - 1];
        if *slot {
            return false;
        }
        *slot = true;
    }
    present.into_iter().all(|seen| seen)
}

/// Encodes a single value.
pub fn encode_one(
    value: &DynamicValue,
    json_form: bool,
    limits: &JsonLimits,
) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new(limits)?;
    encoder.encode(value, EncodeMode::value(json_form))?;
    encoder.buffer.trim_last();
    Ok(encoder.buffer.finalize())
}

/// Encodes a contiguous run of values.
///
/// The run is wrapped in `[...]` unless `json_form` is set and the run holds
/// at most one value, in which case that value is emitted bare.
pub fn encode_range(
    values: &[DynamicValue],
    json_form: bool,
    limits: &JsonLimits,
) -> Result<Vec<u8>, EncodeError> {
    let wrap = !json_form || values.len() > 1;
    let mut encoder = Encoder::new(limits)?;
    if wrap {
        encoder.buffer.append(b"[")?;
    }
    let start = encoder.buffer.len();
    for value in values {
        encoder.encode(value, EncodeMode::value(json_form))?;
    }
    if encoder.buffer.len() != start {
        encoder.buffer.trim_last();
    }
    if wrap {
        encoder.buffer.append(b"]")?;
    }
    Ok(encoder.buffer.finalize())
}
