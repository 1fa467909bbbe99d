use crate::cli::{
    args::DecodeArgs,
    commands::{read_input, write_labeled},
    global::GlobalArgs,
};
use pfe_codec::{Codec, CodecConfig, decode_raw_pfe};
use std::io::{self, Write};

pub fn handle(
    args: DecodeArgs,
    global: &GlobalArgs,
    config: &CodecConfig,
    codec: &Codec,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(args.pfe, args.file.as_deref())?;
    let pfe = input.trim();

    let raw = codec.expand_text(pfe)?;
    let text = decode_raw_pfe(&raw, codec.table())?;
    tracing::debug!(raw_len = raw.len(), chars = text.chars().count(), "decoded text");

    let mut out = io::stdout().lock();
    if args.show_raw || config.show_raw() {
        write_labeled(&mut out, "raw pfe", &raw, global.quiet)?;
        write_labeled(&mut out, "text", &text, global.quiet)?;
    } else {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}
