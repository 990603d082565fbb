//! Type-order model shared by every collation surface: the tag byte per value
//! category, the reserved terminator, and the polarity rules that let one byte
//! identify both a category and its sort direction.

#[macro_use]
mod macros;

///
/// CONSTANTS
///

/// Reserved byte closing every field in normal polarity.
pub const TERMINATOR: u8 = 0x00;

/// Reserved byte closing every field in complemented polarity.
pub const COMPLEMENTED_TERMINATOR: u8 = !TERMINATOR;

type_tag_registry! {
    Missing = 49, "missing", category = true;
    Null = 50, "null", category = true;
    False = 60, "false", category = true;
    True = 70, "true", category = true;
    Number = 80, "number", category = true;
    String = 90, "string", category = true;
    /// Element/pair count of a length-prefixed array or object.
    Length = 100, "length", category = false;
    Array = 110, "array", category = true;
    Object = 120, "object", category = true;
}

impl TypeTag {
    /// Stable byte for this tag in normal polarity.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Byte for this tag in the given polarity.
    #[must_use]
    pub const fn to_u8_in(self, polarity: Polarity) -> u8 {
        polarity.apply(self.to_u8())
    }

    /// Classify a field-opening byte as a tag in either polarity.
    ///
    /// This is the only place where `Tag` and `!Tag` are recognized; every
    /// decoder and navigator goes through it.
    #[must_use]
    pub const fn classify(byte: u8) -> Option<(Self, Polarity)> {
        if let Some(tag) = Self::from_normal(byte) {
            return Some((tag, Polarity::Normal));
        }

        match Self::from_normal(!byte) {
            Some(tag) => Some((tag, Polarity::Complemented)),
            None => None,
        }
    }
}

///
/// Polarity
///
/// Whether a field's bytes are stored as produced by the encoder (ascending)
/// or bit-complemented (descending).
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Polarity {
    #[default]
    Normal,
    Complemented,
}

impl Polarity {
    /// XOR mask mapping stored bytes to normal polarity and back.
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::Normal => 0x00,
            Self::Complemented => 0xFF,
        }
    }

    /// Map one byte between stored and normal form. Self-inverse.
    #[must_use]
    pub const fn apply(self, byte: u8) -> u8 {
        byte ^ self.mask()
    }

    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Normal => Self::Complemented,
            Self::Complemented => Self::Normal,
        }
    }

    /// Polarity of a terminator byte, if the byte is one.
    #[must_use]
    pub const fn of_terminator(byte: u8) -> Option<Self> {
        match byte {
            TERMINATOR => Some(Self::Normal),
            COMPLEMENTED_TERMINATOR => Some(Self::Complemented),
            _ => None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn reserved_bytes_are_pairwise_distinct() {
        let mut seen = BTreeSet::new();
        assert!(seen.insert(TERMINATOR));
        assert!(seen.insert(COMPLEMENTED_TERMINATOR));

        for tag in TypeTag::ALL {
            assert!(seen.insert(tag.to_u8()), "duplicate byte for {}", tag.label());
            assert!(
                seen.insert(tag.to_u8_in(Polarity::Complemented)),
                "complement of {} collides",
                tag.label()
            );
        }

        assert_eq!(seen.len(), 2 + 2 * TypeTag::ALL.len());
    }

    #[test]
    fn value_categories_ascend_in_collation_order() {
        let order = [
            TypeTag::Missing,
            TypeTag::Null,
            TypeTag::False,
            TypeTag::True,
            TypeTag::Number,
            TypeTag::String,
            TypeTag::Array,
            TypeTag::Object,
        ];

        for pair in order.windows(2) {
            assert!(pair[0].to_u8() < pair[1].to_u8());
            assert!(pair[0].to_u8() > TERMINATOR);
        }

        assert!(order.iter().all(|tag| tag.is_value_category()));
        assert!(!TypeTag::Length.is_value_category());
    }

    #[test]
    fn classify_recognizes_both_polarities() {
        for &tag in TypeTag::ALL {
            assert_eq!(
                TypeTag::classify(tag.to_u8()),
                Some((tag, Polarity::Normal))
            );
            assert_eq!(
                TypeTag::classify(!tag.to_u8()),
                Some((tag, Polarity::Complemented))
            );
        }

        assert_eq!(TypeTag::classify(TERMINATOR), None);
        assert_eq!(TypeTag::classify(COMPLEMENTED_TERMINATOR), None);
        assert_eq!(TypeTag::classify(0x42), None);
    }

    #[test]
    fn polarity_mask_is_an_involution() {
        for byte in 0..=u8::MAX {
            for polarity in [Polarity::Normal, Polarity::Complemented] {
                assert_eq!(polarity.apply(polarity.apply(byte)), byte);
            }
        }

        assert_eq!(Polarity::of_terminator(0x00), Some(Polarity::Normal));
        assert_eq!(Polarity::of_terminator(0xFF), Some(Polarity::Complemented));
        assert_eq!(Polarity::of_terminator(0x01), None);
        assert_eq!(Polarity::Normal.flip(), Polarity::Complemented);
    }
}
