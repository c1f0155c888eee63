use std::env;

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, Layer};

fn targets_filter() -> Targets {
    let trace: bool = env::var("NOTARY_TRACE") == Ok(String::from("true"));
    Targets::new()
        .with_default(Level::WARN)
        .with_target("hyper", Level::WARN)
        .with_target("rustls", Level::WARN)
        .with_target(
            "locked_notary",
            if trace { Level::TRACE } else { Level::INFO },
        )
}

/// Install the stderr logger. Stdout is left for the final report.
pub fn init() -> Result<(), TryInitError> {
    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_file(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(targets_filter()))
        .try_init()
}
