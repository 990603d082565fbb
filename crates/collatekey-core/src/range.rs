use crate::key::{EncodedKey, compare};
use std::{cmp::Ordering, ops::Bound};

///
/// KeyRange
///
/// Scan bounds over encoded keys, compared bytewise.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRange {
    pub low: Bound<EncodedKey>,
    pub high: Bound<EncodedKey>,
}

impl KeyRange {
    #[must_use]
    pub const fn new(low: Bound<EncodedKey>, high: Bound<EncodedKey>) -> Self {
        Self { low, high }
    }

    /// Every key.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// Every key whose leading fields equal the encoded `prefix`.
    ///
    /// Fields are prefix-free, so this is the set of keys starting with
    /// `prefix` bytes: `[prefix, successor(prefix))`.
    #[must_use]
    pub fn prefix(prefix: &[u8]) -> Self {
        let high = prefix_successor(prefix).map_or(Bound::Unbounded, Bound::Excluded);

        Self::new(Bound::Included(EncodedKey::from(prefix)), high)
    }

    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        let above_low = match &self.low {
            Bound::Included(low) => compare(key, low) != Ordering::Less,
            Bound::Excluded(low) => compare(key, low) == Ordering::Greater,
            Bound::Unbounded => true,
        };
        let below_high = match &self.high {
            Bound::Included(high) => compare(key, high) != Ordering::Greater,
            Bound::Excluded(high) => compare(key, high) == Ordering::Less,
            Bound::Unbounded => true,
        };

        above_low && below_high
    }
}

// Smallest byte string greater than every string starting with `prefix`;
// none when the prefix is empty or all 0xFF.
fn prefix_successor(prefix: &[u8]) -> Option<EncodedKey> {
    let last = prefix.iter().rposition(|byte| *byte != u8::MAX)?;
    let mut successor = prefix[..=last].to_vec();
    successor[last] += 1;

    Some(successor.into())
}

///
/// TESTS
///
