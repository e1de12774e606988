use crate::cli::TracingFormat;
use crate::config::Config;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Build the subscriber described by the config.
///
/// Returns [`Dispatch::none`] when logging is switched off, so callers can inject
/// the result unconditionally. `RUST_LOG` takes precedence over `log_level`.
pub fn setup_logging(config: &Config, tracing_format: TracingFormat) -> Dispatch {
    if !config.logging {
        return Dispatch::none();
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let base_level = &config.log_level;
        EnvFilter::new(format!("warn,courselist={base_level}"))
    });

    match tracing_format {
        TracingFormat::Pretty => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).compact()),
        ),
        TracingFormat::Json => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .flatten_event(true),
            ),
        ),
    }
}
