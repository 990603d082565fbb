use crate::json::JsonError;
use std::fmt;
use thiserror::Error as ThisError;

// Stable reason strings for decode failures.
pub(crate) const ERR_TRUNCATED_FIELD: &str = "truncated field";
pub(crate) const ERR_UNKNOWN_TAG: &str = "unrecognized tag byte";
pub(crate) const ERR_UNEXPECTED_LENGTH: &str = "length marker outside a structure";
pub(crate) const ERR_MISSING_TERMINATOR: &str = "field is not closed by a terminator";
pub(crate) const ERR_UNTERMINATED_STRUCTURE: &str = "unterminated array or object";
pub(crate) const ERR_OBJECT_KEY: &str = "object key is not a string field";
pub(crate) const ERR_NUMBER_MARKER: &str = "invalid number sign marker";
pub(crate) const ERR_NUMBER_DIGITS: &str = "invalid number digit run";
pub(crate) const ERR_TRAILING_BYTES: &str = "trailing bytes after field";
pub(crate) const ERR_STRING_UNTERMINATED: &str = "string has no end marker";
pub(crate) const ERR_STRING_ESCAPE: &str = "invalid escape after terminator byte";
pub(crate) const ERR_COUNT_TAG: &str = "count field does not carry the length tag";
pub(crate) const ERR_COUNT_NUMBER: &str = "count is not a well-formed number";
pub(crate) const ERR_COUNT_VALUE: &str = "count is not a non-negative integer";
pub(crate) const ERR_COUNT_EXCEEDS_INPUT: &str = "count exceeds remaining input";

///
/// CodecError
///
/// Typed failure for every collation operation. Nothing is retried; the codec
/// performs no I/O and has no transient failure modes.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("malformed key at byte {offset}: {reason}")]
    MalformedInput { offset: usize, reason: &'static str },

    #[error("suffix decoding failed at byte {offset}: {reason}")]
    SuffixDecoding { offset: usize, reason: &'static str },

    #[error("structural count at byte {offset} cannot be parsed: {reason}")]
    CountParse { offset: usize, reason: &'static str },

    #[error("field position {position} is out of range ({available} fields present)")]
    FieldPositionOutOfRange { position: usize, available: usize },

    #[error("number exponent does not fit the collation exponent field")]
    NumberOutOfRange,

    #[error("value nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error(transparent)]
    Json(#[from] JsonError),
}

impl CodecError {
    pub(crate) const fn malformed(offset: usize, reason: &'static str) -> Self {
        Self::MalformedInput { offset, reason }
    }

    pub(crate) const fn suffix(offset: usize, reason: &'static str) -> Self {
        Self::SuffixDecoding { offset, reason }
    }

    pub(crate) const fn count(offset: usize, reason: &'static str) -> Self {
        Self::CountParse { offset, reason }
    }

    /// Coarse kind, used for metrics bucketing.
    #[must_use]
    pub const fn kind(&self) -> CodecErrorKind {
        match self {
            Self::MalformedInput { .. } => CodecErrorKind::MalformedInput,
            Self::SuffixDecoding { .. } => CodecErrorKind::SuffixDecoding,
            Self::CountParse { .. } => CodecErrorKind::CountParse,
            Self::FieldPositionOutOfRange { .. } => CodecErrorKind::FieldPositionOutOfRange,
            Self::NumberOutOfRange => CodecErrorKind::NumberOutOfRange,
            Self::NestingTooDeep { .. } => CodecErrorKind::NestingTooDeep,
            Self::Json(_) => CodecErrorKind::Json,
        }
    }

    /// Classification callers use to separate corrupt stored data (halt and
    /// surface) from caller mistakes (fail the one operation).
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedInput { .. } | Self::SuffixDecoding { .. } | Self::CountParse { .. } => {
                ErrorClass::Corruption
            }
            Self::FieldPositionOutOfRange { .. } | Self::Json(_) => ErrorClass::InvalidArgument,
            Self::NumberOutOfRange | Self::NestingTooDeep { .. } => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.class(), ErrorClass::Corruption)
    }

    /// Byte offset of a decode failure, when the error carries one.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedInput { offset, .. }
            | Self::SuffixDecoding { offset, .. }
            | Self::CountParse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

///
/// CodecErrorKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CodecErrorKind {
    MalformedInput,
    SuffixDecoding,
    CountParse,
    FieldPositionOutOfRange,
    NumberOutOfRange,
    NestingTooDeep,
    Json,
}

impl CodecErrorKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::SuffixDecoding => "suffix_decoding",
            Self::CountParse => "count_parse",
            Self::FieldPositionOutOfRange => "field_position_out_of_range",
            Self::NumberOutOfRange => "number_out_of_range",
            Self::NestingTooDeep => "nesting_too_deep",
            Self::Json => "json",
        }
    }
}

///
/// ErrorClass
///
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Corruption,
    InvalidArgument,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Corruption => "corruption",
            Self::InvalidArgument => "invalid_argument",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}
