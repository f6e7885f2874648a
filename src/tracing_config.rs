use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{GeneralConfig, LogFormat};

/// Initialize tracing for a host application
///
/// Uses the RUST_LOG environment variable if set, otherwise the configured
/// log level. Output is pretty console text or JSON, chosen by
/// NETPROFILE_LOG_FORMAT when set and by the configuration otherwise.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(general: &GeneralConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(general.log_level.to_string()));

    let format = match env::var("NETPROFILE_LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        Ok(_) => LogFormat::Pretty,
        Err(_) => general.log_format,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_target(true).with_level(true))
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_thread_ids(true)
                        .with_thread_names(true),
                )
                .try_init()?;
        }
    }

    Ok(())
}
