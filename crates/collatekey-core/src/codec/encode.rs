//! Module: codec::encode
//! Responsibility: value -> field bytes in normal polarity.
//! Does not own: descending transforms (see `codec::reverse`).
//! Boundary: output is prefix-free per field; callers concatenate fields into
//! composite keys.

use crate::{
    codec::enter_structure,
    config::CodecConfig,
    error::CodecError,
    number::{Number, codec::push_payload},
    pool::BufferPool,
    value::Value,
};
use collatekey_primitives::{TERMINATOR, TypeTag};

// Follows a literal terminator byte inside string payloads.
pub(crate) const STRING_ESCAPE: u8 = 0x01;

///
/// Encoder
///

pub(crate) struct Encoder<'c> {
    config: CodecConfig,
    pool: &'c BufferPool,
}

impl<'c> Encoder<'c> {
    pub(crate) const fn new(config: CodecConfig, pool: &'c BufferPool) -> Self {
        Self { config, pool }
    }

    /// Append one complete field for `value`.
    pub(crate) fn encode_field(
        &self,
        out: &mut Vec<u8>,
        value: &Value,
        depth: usize,
    ) -> Result<(), CodecError> {
        out.push(value.type_tag().to_u8());

        match value {
            Value::Missing | Value::Null | Value::Bool(_) => {}
            Value::Number(number) => self.push_number(out, number)?,
            Value::String(bytes) => push_string(out, bytes),
            Value::Array(items) => {
                let depth = enter_structure(depth)?;
                if self.config.array_len_prefix {
                    self.push_count(out, items.len())?;
                }
                for item in items {
                    self.encode_field(out, item, depth)?;
                }
            }
            Value::Object(pairs) => {
                let depth = enter_structure(depth)?;
                if self.config.property_len_prefix {
                    self.push_count(out, pairs.len())?;
                }
                for (key, value) in pairs {
                    out.push(TypeTag::String.to_u8());
                    push_string(out, key);
                    out.push(TERMINATOR);
                    self.encode_field(out, value, depth)?;
                }
            }
        }

        out.push(TERMINATOR);

        Ok(())
    }

    fn push_number(&self, out: &mut Vec<u8>, number: &Number) -> Result<(), CodecError> {
        let mut scratch = self.pool.acquire();

        push_payload(out, number, &mut scratch)
    }

    // Count field: Length tag, number payload, terminator.
    fn push_count(&self, out: &mut Vec<u8>, count: usize) -> Result<(), CodecError> {
        out.push(TypeTag::Length.to_u8());
        self.push_number(out, &Number::from(count))?;
        out.push(TERMINATOR);

        Ok(())
    }
}

// Raw bytes with each literal terminator escaped, then the first byte of the
// end pair; the field terminator completes it.
fn push_string(out: &mut Vec<u8>, bytes: &[u8]) {
    out.reserve(bytes.len() + 1);
    for &byte in bytes {
        out.push(byte);
        if byte == TERMINATOR {
            out.push(STRING_ESCAPE);
        }
    }
    out.push(TERMINATOR);
}
