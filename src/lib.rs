//! Prime factorization encoding.
//!
//! Integers are written as the exponents of their prime factors (PFN) and
//! text as a sequence of fixed-width PFN blocks, one per character (PFE).
//! Both layers fold long runs of zero exponents into brackets holding the
//! PFN of the run length, so the notation compresses itself.
//!
//! ```
//! use pfe_codec::{BigUint, decode_number, decode_text, encode_number, encode_text};
//!
//! assert_eq!(encode_number(12).unwrap(), "1'2");
//! assert_eq!(decode_number("1'(3)'1").unwrap(), BigUint::from(58u32));
//!
//! let pfe = encode_text("hi").unwrap();
//! assert_eq!(pfe, "[2]'1'(2)'3'[1'0]'1'1'1'0");
//! assert_eq!(decode_text(&pfe).unwrap(), "hi");
//! ```

mod core;
mod encoders;

pub mod prelude;

pub use crate::core::config::{CodecConfig, DisplaySettings, LimitSettings, TableSettings};
pub use crate::core::table::{CharacterTable, DEFAULT_WIDTH, TABLE_SIZE};
pub use encoders::algorithms::errors::{PfeError, Result};
pub use encoders::codec::{Codec, default_codec};
pub use encoders::pfe::{
    decode_raw_pfe, encode_pfe, simplify_pfe, simplify_pfe_with_limits, unsimplify_pfe,
};
pub use encoders::pfn::{
    Limits, decode_pfn, encode_pfn, encode_pfn_padded, encode_pfn_with_limits, expand_pfn,
    normal_num, simplify_pfn, slot_count,
};
pub use encoders::primes::{
    Order, factorize, factorize_upto, first_primes, nth_prime_bound, primes_upto,
};

pub use num_bigint::BigUint;

/// Encodes text into simplified PFE using the default codec.
pub fn encode_text(text: &str) -> Result<String> {
    default_codec()?.encode_text(text)
}

/// Decodes simplified PFE back into text using the default codec.
pub fn decode_text(pfe: &str) -> Result<String> {
    default_codec()?.decode_text(pfe)
}

/// Encodes an integer into simplified PFN.
pub fn encode_number(n: u64) -> Result<String> {
    default_codec()?.encode_number(n)
}

/// Decodes PFN back into an integer using the default limits.
pub fn decode_number(pfn: &str) -> Result<BigUint> {
    default_codec()?.decode_number(pfn)
}
