use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::error::SubmitError;
use crate::config::ApiConfig;
use crate::model::Record;

/// Endpoint path for measurement submissions, relative to the base URL.
const MEASUREMENTS_PATH: &str = "measurements";

/// Sends a record to the QC server.
///
/// A trait seam so the save flow can be exercised against a scripted gateway
/// without a network. The returned future is `'static`: implementations
/// capture everything they need up front, and the app runs the future on its
/// own runtime while the event loop keeps going.
pub trait SubmissionGateway: Send + Sync {
    /// Submits the record, resolving to the server's (opaque) JSON response.
    fn submit(&self, record: Record) -> BoxFuture<'static, Result<serde_json::Value, SubmitError>>;
}

/// [`SubmissionGateway`] over HTTP POST with `reqwest`.
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    /// Builds a gateway for the configured QC server.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            url: measurements_url(&config.base_url),
        })
    }

    /// Returns the resolved submission URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Joins the base URL and the measurements path, tolerating a trailing slash.
fn measurements_url(base_url: &str) -> String {
    format!("{}/{MEASUREMENTS_PATH}", base_url.trim_end_matches('/'))
}

impl SubmissionGateway for HttpGateway {
    fn submit(&self, record: Record) -> BoxFuture<'static, Result<serde_json::Value, SubmitError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        async move {
            let response = client.post(&url).json(&record).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(SubmitError::Status(status));
            }
            Ok(response.json().await?)
        }
        .boxed()
    }
}
