use crate::cli::{args::DictArgs, commands::display_char};
use pfe_codec::Codec;
use std::io::{self, Write};

pub fn handle(args: DictArgs, codec: &Codec) -> Result<(), Box<dyn std::error::Error>> {
    let table = codec.table();
    let mut out = io::stdout().lock();

    if args.json {
        let entries: Vec<_> = table
            .iter()
            .map(|(c, notation)| {
                serde_json::json!({
                    "code_point": u32::from(c),
                    "character": c.to_string(),
                    "notation": notation,
                })
            })
            .collect();
        let output = serde_json::json!({ "width": table.width(), "entries": entries });
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    for (c, notation) in table.iter() {
        writeln!(out, "{:>3}  {:<8}  {}", u32::from(c), display_char(c), notation)?;
    }
    Ok(())
}
