//! Console logging initialization.
//!
//! Filter precedence: `RUST_LOG` → `logging.level` (already adjusted by `-v`
//! flags in [`AppConfig::apply_cli_overrides`](crate::config::AppConfig::apply_cli_overrides)).
//! Output goes to stderr so stdout stays clean for `--print-config`.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Build the env filter for the given logging config.
///
/// # Errors
/// Returns an error if neither `RUST_LOG` nor `cfg.level` is a valid directive.
pub fn build_filter(cfg: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .with_context(|| format!("invalid log level directive '{}'", cfg.level))
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(cfg)?;
    let registry = tracing_subscriber::registry().with(filter);

    match cfg.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    }
    .context("failed to install tracing subscriber")
}
