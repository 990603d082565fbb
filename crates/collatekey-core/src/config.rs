//! Module: config
//! Responsibility: per-index collation settings persisted with index metadata.
//! Does not own: encoding logic.
//! Boundary: the same `CodecConfig` must drive every encode and decode of a
//! given index's keys; mixing modes corrupts field boundaries.

use crate::{
    codec::Codec,
    error::CodecError,
    key::EncodedKey,
    pool::BufferPool,
    value::Value,
};
use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

///
/// CodecConfig
///
/// Structural encoding mode for arrays and objects.
///
/// `Default` is terminator-delimited arrays with length-prefixed objects, so
/// objects with fewer pairs collate first.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CodecConfig {
    pub array_len_prefix: bool,
    pub property_len_prefix: bool,
}

impl CodecConfig {
    /// Both structures closed by terminator scanning only.
    pub const TERMINATED: Self = Self::new(false, false);

    /// Both structures carry an explicit element/pair count.
    pub const LENGTH_PREFIXED: Self = Self::new(true, true);

    #[must_use]
    pub const fn new(array_len_prefix: bool, property_len_prefix: bool) -> Self {
        Self {
            array_len_prefix,
            property_len_prefix,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(false, true)
    }
}

///
/// DescVector
///
/// One flag per top-level field of a composite key; `true` marks a field
/// stored complemented (descending).
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, From, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DescVector(Vec<bool>);

impl DescVector {
    #[must_use]
    pub const fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// All-ascending vector for `fields` fields.
    #[must_use]
    pub fn ascending(fields: usize) -> Self {
        Self(vec![false; fields])
    }

    #[must_use]
    pub fn is_descending(&self, field: usize) -> bool {
        self.0.get(field).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn any_descending(&self) -> bool {
        self.0.iter().any(|flag| *flag)
    }

    /// Reject a vector naming more fields than a key carries.
    pub fn validate_for(&self, field_count: usize) -> Result<(), CodecError> {
        if self.0.len() > field_count {
            return Err(CodecError::FieldPositionOutOfRange {
                position: self.0.len(),
                available: field_count,
            });
        }

        Ok(())
    }
}

impl From<&[bool]> for DescVector {
    fn from(flags: &[bool]) -> Self {
        Self(flags.to_vec())
    }
}

///
/// IndexCollation
///
/// Collation half of an index definition: structural mode plus sort
/// direction per indexed expression.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexCollation {
    pub config: CodecConfig,
    pub desc: DescVector,
}

impl IndexCollation {
    #[must_use]
    pub const fn new(config: CodecConfig, desc: DescVector) -> Self {
        Self { config, desc }
    }

    /// Build a codec with a private buffer pool.
    #[must_use]
    pub fn codec(&self) -> Codec {
        Codec::new(self.config)
    }

    /// Build a codec sharing an existing buffer pool.
    #[must_use]
    pub fn codec_with_pool(&self, pool: Arc<BufferPool>) -> Codec {
        Codec::with_pool(self.config, pool)
    }

    /// Encode one index entry's fields and apply the sort directions.
    pub fn encode_key(&self, codec: &Codec, fields: &[Value]) -> Result<EncodedKey, CodecError> {
        debug_assert_eq!(codec.config(), self.config);
        self.desc.validate_for(fields.len())?;

        let key = codec.encode_composite(fields)?;
        if !self.desc.any_descending() {
            return Ok(key);
        }

        codec.apply_desc(key, &self.desc)
    }

    /// Decode a stored key back to its field values.
    ///
    /// Complemented fields decode directly; no reversal pass is needed.
    pub fn decode_key(&self, codec: &Codec, key: &[u8]) -> Result<Vec<Value>, CodecError> {
        debug_assert_eq!(codec.config(), self.config);

        codec.decode_composite(key)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_prefixes_objects_only() {
        let config = CodecConfig::default();
        assert!(!config.array_len_prefix);
        assert!(config.property_len_prefix);
    }

    #[test]
    fn index_collation_round_trips_through_json_metadata() {
        let collation = IndexCollation::new(
            CodecConfig::LENGTH_PREFIXED,
            DescVector::new(vec![false, true, false]),
        );

        let text = serde_json::to_string(&collation).expect("collation should serialize");
        assert_eq!(
            text,
            r#"{"config":{"array_len_prefix":true,"property_len_prefix":true},"desc":[false,true,false]}"#
        );

        let back: IndexCollation = serde_json::from_str(&text).expect("collation should parse");
        assert_eq!(back, collation);
    }

    #[test]
    fn desc_vector_validates_against_field_count() {
        let desc = DescVector::from(&[true, false][..]);
        assert!(desc.validate_for(2).is_ok());
        assert!(desc.validate_for(3).is_ok());
        assert_eq!(
            desc.validate_for(1),
            Err(CodecError::FieldPositionOutOfRange {
                position: 2,
                available: 1,
            })
        );
        assert!(desc.is_descending(0));
        assert!(!desc.is_descending(1));
        assert!(!desc.is_descending(9));
    }

    #[test]
    fn encode_key_applies_descending_fields() {
        let collation = IndexCollation::new(
            CodecConfig::default(),
            DescVector::new(vec![false, true]),
        );
        let codec = collation.codec();
        let fields = [Value::from(10), Value::from("b")];

        let key = collation
            .encode_key(&codec, &fields)
            .expect("key should encode");
        let plain = codec.encode_composite(&fields).expect("plain should encode");
        assert_ne!(key, plain);

        let (first, rest) = codec.split_field(&key).expect("first field");
        let (plain_first, plain_rest) = codec.split_field(&plain).expect("first field");
        assert_eq!(first, plain_first);
        assert!(rest.iter().zip(plain_rest).all(|(l, r)| *l == !*r));

        let decoded = collation.decode_key(&codec, &key).expect("key should decode");
        assert_eq!(decoded, fields);
    }
}
