use std::sync::OnceLock;

use num_bigint::BigUint;

use crate::core::config::CodecConfig;
use crate::core::table::CharacterTable;
use crate::encoders::algorithms::errors::Result;
use crate::encoders::algorithms::pfe::{
    decode_raw_pfe, encode_pfe, simplify_pfe_with_limits, unsimplify_pfe,
};
use crate::encoders::algorithms::pfn::{Limits, decode_pfn, encode_pfn_with_limits};

/// A character table and decoder limits, bundled for both codec directions.
///
/// Immutable once built; share it by reference.
///
/// # Example
///
/// ```
/// use pfe_codec::Codec;
///
/// let codec = Codec::new().unwrap();
/// let encoded = codec.encode_text("a").unwrap();
///
/// assert_eq!(encoded, "[2]'1'(1'3)");
/// assert_eq!(codec.decode_text(&encoded).unwrap(), "a");
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    table: CharacterTable,
    limits: Limits,
}

impl Codec {
    /// Builds a codec with the default table width and limits.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(CharacterTable::new()?, Limits::default()))
    }

    /// Bundles an existing table and limits.
    pub fn with_parts(table: CharacterTable, limits: Limits) -> Self {
        Codec { table, limits }
    }

    /// Builds a codec from a loaded configuration.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        let table = CharacterTable::with_width(config.width())?;
        Ok(Self::with_parts(table, config.limits()))
    }

    pub fn table(&self) -> &CharacterTable {
        &self.table
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Text to raw PFE, before run folding.
    pub fn encode_text_raw(&self, text: &str) -> Result<String> {
        encode_pfe(text, &self.table)
    }

    /// Text to simplified PFE.
    pub fn encode_text(&self, text: &str) -> Result<String> {
        Ok(self.simplify_text(&self.encode_text_raw(text)?))
    }

    /// Raw PFE to simplified PFE, folding only runs these limits can expand.
    pub fn simplify_text(&self, raw: &str) -> String {
        simplify_pfe_with_limits(raw, &self.limits)
    }

    /// Simplified PFE back to raw PFE.
    pub fn expand_text(&self, pfe: &str) -> Result<String> {
        unsimplify_pfe(pfe, &self.limits)
    }

    /// Simplified PFE to text.
    pub fn decode_text(&self, pfe: &str) -> Result<String> {
        decode_raw_pfe(&self.expand_text(pfe)?, &self.table)
    }

    /// Integer to simplified PFN.
    ///
    /// Fails with `InvalidArgument` for values whose notation would need
    /// more exponent slots than the limits let [`Codec::decode_number`] read.
    pub fn encode_number(&self, n: u64) -> Result<String> {
        encode_pfn_with_limits(n, &self.limits)
    }

    /// PFN to integer.
    pub fn decode_number(&self, pfn: &str) -> Result<BigUint> {
        decode_pfn(pfn, &self.limits)
    }
}

static DEFAULT_CODEC: OnceLock<Codec> = OnceLock::new();

/// Returns the process-wide codec with default settings, building it on
/// first use.
pub fn default_codec() -> Result<&'static Codec> {
    if let Some(codec) = DEFAULT_CODEC.get() {
        return Ok(codec);
    }
    let codec = Codec::new()?;
    Ok(DEFAULT_CODEC.get_or_init(|| codec))
}
