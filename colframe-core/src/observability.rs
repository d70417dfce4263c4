// In: src/observability.rs

//! Installs the `env_logger` backend for the `log` facade used throughout the
//! crate. Library code only ever emits through `log::*!`; nothing is printed
//! until an application calls `init_logging`.

use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Once;

use log::LevelFilter;

use crate::config::MonitoringConfig;
use crate::error::ColframeError;

static INIT_LOGGER: Once = Once::new();

/// Installs the global logger once per process. Later calls are no-ops, even
/// with a different configuration.
pub fn init_logging(config: &MonitoringConfig) -> Result<(), ColframeError> {
    let level = LevelFilter::from_str(&config.log_level).map_err(|_| {
        ColframeError::InvalidConfig(format!("unknown log level '{}'", config.log_level))
    })?;

    // Open the file up front so a bad path is reported instead of swallowed.
    let file = match &config.log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Just the level and the message.
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        // Another logger may already be installed by the host application.
        let _ = builder.try_init();
    });
    Ok(())
}
