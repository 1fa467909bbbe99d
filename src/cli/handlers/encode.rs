use crate::cli::{
    args::EncodeArgs,
    commands::{read_input, write_labeled},
    global::GlobalArgs,
};
use pfe_codec::{Codec, CodecConfig};
use std::io::{self, Write};

pub fn handle(
    args: EncodeArgs,
    global: &GlobalArgs,
    config: &CodecConfig,
    codec: &Codec,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut text = read_input(args.text, args.file.as_deref())?;
    if args.lowercase || config.lowercase() {
        text = text.to_lowercase();
    }

    let raw = codec.encode_text_raw(&text)?;
    let simplified = codec.simplify_text(&raw);
    tracing::debug!(
        chars = text.chars().count(),
        raw_len = raw.len(),
        simplified_len = simplified.len(),
        "encoded text"
    );

    let mut out = io::stdout().lock();
    if args.show_raw || config.show_raw() {
        write_labeled(&mut out, "raw pfe", &raw, global.quiet)?;
        write_labeled(&mut out, "simplified pfe", &simplified, global.quiet)?;
    } else {
        writeln!(out, "{}", simplified)?;
    }
    Ok(())
}
