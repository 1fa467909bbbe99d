mod args;
mod commands;
mod global;
mod handlers;
mod logging;

use clap::{Parser, Subcommand};
use pfe_codec::{Codec, PfeError};
use std::process::ExitCode;

use args::{ConfigArgs, DecodeArgs, DictArgs, EncodeArgs, NumberArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "pfe")]
#[command(version)]
#[command(about = "Prime factorization encoding: integers and text as self-compressing prime exponent notation", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into simplified PFE
    Encode(EncodeArgs),
    /// Decode simplified PFE back into text
    Decode(DecodeArgs),
    /// Encode an integer into PFN, or decode PFN with --decode
    Number(NumberArgs),
    /// Print the 256-entry character table
    Dict(DictArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
    /// Menu-driven session (the default without a subcommand)
    Interactive,
}

pub fn run() -> ExitCode {
    let Cli { global, command } = Cli::parse();
    logging::setup_logging(global.log_directives(), global.log_json, !global.no_color);

    match execute(command, &global) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(e.as_ref(), &global);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Option<Command>, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = global.load_config()?;
    let codec = Codec::from_config(&config)?;
    tracing::debug!(width = codec.table().width(), "codec ready");

    match command.unwrap_or(Command::Interactive) {
        Command::Encode(args) => handlers::encode::handle(args, global, &config, &codec),
        Command::Decode(args) => handlers::decode::handle(args, global, &config, &codec),
        Command::Number(args) => handlers::number::handle(args, global, &codec),
        Command::Dict(args) => handlers::dict::handle(args, &codec),
        Command::Config(args) => handlers::config::handle(args, &config),
        Command::Interactive => handlers::interactive::handle(global, &config, &codec),
    }
}

fn report(err: &(dyn std::error::Error + 'static), global: &GlobalArgs) {
    match err.downcast_ref::<PfeError>() {
        Some(pfe) if global.no_color => eprintln!("{}", pfe.plain()),
        Some(pfe) => eprintln!("{}", pfe),
        None => eprintln!("error: {}", err),
    }
}
