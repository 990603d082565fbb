//! Core runtime for collatekey: values, the collation codec, key navigation,
//! order reversal, and the helpers exported via the `prelude`.

// public exports are one module level down
pub mod codec;
pub mod config;
pub mod entry;
pub mod error;
pub mod json;
pub mod key;
pub mod number;
pub mod obs;
pub mod pool;
pub mod range;
pub mod value;

pub use collatekey_primitives as primitives;
pub use error::CodecError;

///
/// CONSTANTS
///

/// Maximum number of nested array/object levels accepted by encode and
/// decode.
///
/// Bounds recursion depth on untrusted stored keys.
pub const MAX_NESTING_DEPTH: usize = 128;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or pools are re-exported here.
///

pub mod prelude {
    pub use crate::{
        codec::Codec,
        config::{CodecConfig, DescVector, IndexCollation},
        key::{EncodedKey, compare},
        number::Number,
        value::Value,
    };
}
