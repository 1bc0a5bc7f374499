use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

/// Overrides the verbosity flags with a full filter directive when set.
pub const LOG_ENV_VAR: &str = "BINDMODE_LOG";

/// Filter directive for a `-v` count. Third-party crates stay one level quieter than
/// the analysis itself.
fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,bindmode=info",
        2 => "info,bindmode=debug",
        _ => "debug,bindmode=trace",
    }
}

fn build_filter(verbosity: u8, quiet: bool, env_directive: Option<String>) -> Result<EnvFilter> {
    let directive = match env_directive {
        _ if quiet => "off".to_string(),
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => verbosity_directive(verbosity).to_string(),
    };
    EnvFilter::try_new(&directive)
        .map_err(|e| CliError::Argument(format!("Invalid {LOG_ENV_VAR} directive '{directive}': {e}")))
}

/// Log file output: plain text with targets and thread ids, plus one line per closed
/// span so each load phase and classifier run is timed.
fn file_layer<S>(file: File) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbosity, quiet, std::env::var(LOG_ENV_VAR).ok())?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .without_time()
        .compact();

    let subscriber = tracing_subscriber::registry().with(filter).with(stderr_layer);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(CliError::Io)?;
            subscriber.with(file_layer(file)).try_init()
        }
        None => subscriber.try_init(),
    };

    installed
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install the global logger: {}", e)))
}
