use crate::cli::{args::NumberArgs, commands::write_labeled, global::GlobalArgs};
use pfe_codec::{Codec, PfeError, expand_pfn};
use std::io::{self, Write};

pub fn handle(
    args: NumberArgs,
    global: &GlobalArgs,
    codec: &Codec,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = args.value.trim();
    let mut out = io::stdout().lock();

    if args.decode {
        let n = codec.decode_number(value)?;
        if args.show_raw {
            let flat = expand_pfn(value, codec.limits())?;
            write_labeled(&mut out, "flat pfn", &flat, global.quiet)?;
            write_labeled(&mut out, "integer", &n.to_string(), global.quiet)?;
        } else {
            writeln!(out, "{}", n)?;
        }
        return Ok(());
    }

    let n = parse_integer(value)?;
    let pfn = codec.encode_number(n)?;
    if args.show_raw {
        let flat = expand_pfn(&pfn, codec.limits())?;
        write_labeled(&mut out, "flat pfn", &flat, global.quiet)?;
        write_labeled(&mut out, "pfn", &pfn, global.quiet)?;
    } else {
        writeln!(out, "{}", pfn)?;
    }
    Ok(())
}

fn parse_integer(value: &str) -> Result<u64, PfeError> {
    if value.starts_with('-') {
        return Err(PfeError::invalid_argument(format!(
            "{} is negative; only non-negative integers have a notation",
            value
        )));
    }
    value.parse::<u64>().map_err(|e| {
        PfeError::invalid_argument(format!("'{}' is not a 64-bit non-negative integer: {}", value, e))
    })
}
