use clap::Args;
use std::path::PathBuf;

/// Arguments for encoding text
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text to encode (reads --file or stdin if not provided)
    pub text: Option<String>,

    /// Read the text from this file
    #[arg(short = 'f', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Also print the raw, unsimplified PFE
    #[arg(long)]
    pub show_raw: bool,

    /// Lower-case the text before encoding
    #[arg(long)]
    pub lowercase: bool,
}

/// Arguments for decoding PFE
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Simplified PFE to decode (reads --file or stdin if not provided)
    pub pfe: Option<String>,

    /// Read the PFE from this file
    #[arg(short = 'f', long, conflicts_with = "pfe")]
    pub file: Option<PathBuf>,

    /// Also print the expanded, raw PFE
    #[arg(long)]
    pub show_raw: bool,
}

/// Arguments for integer conversion
#[derive(Args, Debug)]
pub struct NumberArgs {
    /// Non-negative integer, or PFN when --decode is given
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Decode PFN into an integer instead
    #[arg(short = 'd', long)]
    pub decode: bool,

    /// Also print the flat PFN with every zero slot spelled out
    #[arg(long)]
    pub show_raw: bool,
}

/// Arguments for listing the character table
#[derive(Args, Debug)]
pub struct DictArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for showing the effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}
