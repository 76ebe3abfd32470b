//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured log level. Production
//! emits JSON lines; other environments use the human-readable format.
//! Output goes to stderr so client command output stays clean on stdout.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

pub fn init(config: &ServerConfig) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
