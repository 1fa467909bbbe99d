use crate::cli::args::ConfigArgs;
use pfe_codec::CodecConfig;

pub fn handle(args: ConfigArgs, config: &CodecConfig) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = config.resolved();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", toml::to_string(&resolved)?);
    }
    Ok(())
}
