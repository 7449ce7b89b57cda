//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::AppError;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "WASTE_LOG";
const DEFAULT_FILTER: &str = "household_waste=warn";

/// Initialise logging to stderr.
///
/// A `.env` file in the working directory is honoured before the filter is
/// read. The interactive page does not call this: it owns the terminal.
pub fn init() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| AppError::usage(format!("Invalid {LOG_ENV} filter: {e}")))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(format_layer)
        .try_init()
        .map_err(|e| AppError::usage(format!("Failed to initialise logging: {e}")))?;

    Ok(())
}
