//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use pfe_codec::prelude::*;
//!
//! let codec = Codec::new().unwrap();
//! let encoded = codec.encode_text("pfe").unwrap();
//! assert_eq!(decode_text(&encoded).unwrap(), "pfe");
//! ```

pub use crate::{
    // Core entry points
    BigUint,
    CharacterTable,
    Codec,
    Limits,
    PfeError,
    // Config
    CodecConfig,
    // Default-codec shortcuts
    decode_number,
    decode_text,
    encode_number,
    encode_text,
};
