//! ## Crate layout
//! - `core`: values, the collation codec, navigation, reversal, and
//!   observability.
//! - `primitives`: the type-order model (tag bytes and polarity).
//!
//! The `prelude` module mirrors the surface an indexer needs to build,
//! compare, and scan index keys.

pub use collatekey_core as core;
pub use collatekey_primitives as primitives;

/// re-exports
///
/// lets downstream crates name the same dependency versions the codec uses
/// without declaring them in their own Cargo.toml
pub mod __reexports {
    pub use derive_more;
    pub use num_traits;
    pub use serde_json;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{CodecError, MAX_NESTING_DEPTH};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        codec::Codec,
        config::{CodecConfig, DescVector, IndexCollation},
        entry::IndexEntry,
        key::{EncodedKey, compare},
        number::Number,
        range::KeyRange,
        value::{Value, collate},
    };
    pub use serde::{Deserialize, Serialize};
}
