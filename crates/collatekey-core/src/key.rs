use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// EncodedKey
///
/// Owned collation bytes: one or more fields, concatenated. Derived ordering
/// is the unsigned lexicographic byte order the storage layer sorts by.
///

#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    Deserialize,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct EncodedKey(Vec<u8>);

impl EncodedKey {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for EncodedKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for EncodedKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<EncodedKey> for Vec<u8> {
    fn from(key: EncodedKey) -> Self {
        key.0
    }
}

/// Order two stored keys. Plain unsigned lexicographic comparison; no
/// decoding is ever needed to sort keys.
#[must_use]
pub fn compare(left: &[u8], right: &[u8]) -> Ordering {
    left.cmp(right)
}
