//! Screen publishing port

use async_trait::async_trait;
use domain::RenderedDashboard;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Publisher errors
#[derive(Debug, Error)]
pub enum PublishError {
    /// Transport failure or timeout reaching the screen server
    #[error("Publish request failed: {0}")]
    Fetch(String),

    /// Screen server answered with a non-success status
    #[error("Screen server rejected dashboard (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, for the operator log
        body: String,
    },
}

/// Display device endpoint that receives rendered dashboards
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScreenPort: Send + Sync {
    /// Upload one rendered dashboard
    ///
    /// A rejection is terminal for the cycle; there is no retry.
    async fn publish(&self, dashboard: &RenderedDashboard) -> Result<(), PublishError>;
}
