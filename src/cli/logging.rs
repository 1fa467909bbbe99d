//! Sets up logging for the command line front end using `tracing_subscriber`.
//!
//! Events always go to stderr; stdout carries nothing but codec output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Sets up logging in either JSON or human readable format.
///
/// `PFE_LOG` (then `RUST_LOG`) takes precedence over `directives`.
pub fn setup_logging(directives: &str, json: bool, ansi: bool) {
    match json {
        true => setup_logging_json(directives),
        false => setup_logging_human(directives, ansi),
    }
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_env("PFE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directives))
}

fn setup_logging_json(directives: &str) {
    let main_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(main_layer)
        .init()
}

fn setup_logging_human(directives: &str, ansi: bool) {
    let main_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(main_layer)
        .init()
}
