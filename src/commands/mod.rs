pub mod dense;
pub mod embed;
pub mod similar;
pub mod stats;
pub mod summarize;

use newscluster::error::{NewsError, Result};

/// Current-thread runtime for the commands that talk HTTP.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| NewsError::Config(format!("tokio runtime: {}", e)))
}
