//! Module: entry
//! Responsibility: framing of stored index entries (secondary key + docid).
//! Does not own: the secondary key's internal field layout.
//! Boundary: entries sort by secondary key first because collation fields are
//! prefix-free; the docid breaks ties.

use crate::key::EncodedKey;
use thiserror::Error as ThisError;

const DOCID_LEN_BYTES: usize = 2;

///
/// EntryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EntryError {
    #[error("docid length {len} exceeds the entry limit of {max} bytes")]
    DocIdTooLong { len: usize, max: usize },

    #[error("entry of {len} bytes is too short for its docid trailer")]
    Truncated { len: usize },

    #[error("entry trailer names a {docid_len}-byte docid but only {available} bytes precede it")]
    DocIdLength { docid_len: usize, available: usize },
}

///
/// IndexEntry
///
/// `secondary_key ++ docid ++ u16_be(len(docid))`
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IndexEntry {
    bytes: Vec<u8>,
    key_len: usize,
}

impl IndexEntry {
    pub const MAX_DOCID_LEN: usize = 0xFFFF;

    pub fn new(key: &[u8], docid: &[u8]) -> Result<Self, EntryError> {
        let docid_len = u16::try_from(docid.len()).map_err(|_| EntryError::DocIdTooLong {
            len: docid.len(),
            max: Self::MAX_DOCID_LEN,
        })?;

        let mut bytes = Vec::with_capacity(key.len() + docid.len() + DOCID_LEN_BYTES);
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(docid);
        bytes.extend_from_slice(&docid_len.to_be_bytes());

        Ok(Self {
            bytes,
            key_len: key.len(),
        })
    }

    /// Re-frame stored entry bytes, validating the docid trailer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EntryError> {
        let body_len = bytes
            .len()
            .checked_sub(DOCID_LEN_BYTES)
            .ok_or(EntryError::Truncated { len: bytes.len() })?;
        let docid_len = usize::from(u16::from_be_bytes([bytes[body_len], bytes[body_len + 1]]));
        let key_len = body_len
            .checked_sub(docid_len)
            .ok_or(EntryError::DocIdLength {
                docid_len,
                available: body_len,
            })?;

        Ok(Self { bytes, key_len })
    }

    #[must_use]
    pub fn secondary_key(&self) -> &[u8] {
        &self.bytes[..self.key_len]
    }

    #[must_use]
    pub fn docid(&self) -> &[u8] {
        &self.bytes[self.key_len..self.bytes.len() - DOCID_LEN_BYTES]
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Owned copy of the secondary key.
    #[must_use]
    pub fn to_key(&self) -> EncodedKey {
        EncodedKey::from(self.secondary_key())
    }
}

///
/// TESTS
///
