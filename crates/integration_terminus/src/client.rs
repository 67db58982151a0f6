//! Terminus screen server client
//!
//! POSTs rendered dashboards to `/api/screens` with a static access
//! token. Rejections are reported with the response body for the operator
//! log and never retried within a cycle.

use application::ports::{PublishError, ScreenPort};
use async_trait::async_trait;
use domain::RenderedDashboard;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

/// Screen server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminusConfig {
    /// Screen server base URL (e.g. `http://terminus.local:2300`)
    pub base_url: String,

    /// Static access token sent with every upload
    pub access_token: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    30
}

/// HTTP client for the Terminus screen API
#[derive(Debug)]
pub struct TerminusClient {
    client: Client,
    config: TerminusConfig,
}

impl TerminusClient {
    /// Create a new screen server client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TerminusConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PublishError::Fetch(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn screens_url(&self) -> String {
        format!("{}/api/screens", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ScreenPort for TerminusClient {
    #[instrument(skip(self, dashboard), fields(file_name = %dashboard.file_name))]
    async fn publish(&self, dashboard: &RenderedDashboard) -> Result<(), PublishError> {
        // The content field is JSON-encoded a second time; the server
        // decodes it before writing the file to disk.
        let content = serde_json::to_string(&dashboard.html)
            .map_err(|e| PublishError::Fetch(e.to_string()))?;

        let body = json!({
            "image": {
                "content": content,
                "file_name": dashboard.file_name,
            }
        });

        let url = self.screens_url();
        debug!(url = %url, "uploading dashboard");

        let response = self
            .client
            .post(&url)
            .header("Access-Token", &self.config.access_token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::Fetch(e.to_string()))?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body: response_body,
            });
        }

        debug!(response = %response_body, "screen server accepted dashboard");
        Ok(())
    }
}
