use clap::Args;
use pfe_codec::CodecConfig;
use std::path::PathBuf;

/// Global arguments that apply to all subcommands
#[derive(Args)]
pub struct GlobalArgs {
    /// Print bare results without labels
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log codec internals to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file to layer over the built-in defaults
    /// (skips ~/.config/pfe/pfe.toml and ./pfe.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Filter directives used when neither PFE_LOG nor RUST_LOG is set.
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "warn,pfe_codec=debug,pfe=debug",
            _ => "warn,pfe_codec=trace,pfe=trace",
        }
    }

    /// Loads the configuration named by `--config`, or the layered defaults.
    pub fn load_config(&self) -> Result<CodecConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => {
                let mut config = CodecConfig::load_default()?;
                config.merge(CodecConfig::load_from_file(path)?);
                Ok(config)
            }
            None => CodecConfig::load_with_overrides(),
        }
    }
}
