use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

use crate::error::{EtlError, Result};
use crate::records::{FetchResponse, LoginRecord, SubmissionPayload};

/// Blocking HTTP client for the login-record endpoint.
///
/// The same URL serves both roles: GET returns the raw records, POST
/// receives the derived report. Both calls are made exactly once per run;
/// retry policy, if any, belongs to the caller.
pub struct ApiClient {
    endpoint: Url,
    http: Client,
}

impl ApiClient {
    /// Build a client with a fixed request timeout covering both calls.
    pub fn new(endpoint: Url, timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, http })
    }

    /// GET the raw login records. One attempt, no retry.
    pub fn fetch_login_records(&self) -> Result<Vec<LoginRecord>> {
        let start_time = Instant::now();
        info!(action = "start", component = "fetch", url = %self.endpoint, "Fetching login records");

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .map_err(|source| EtlError::Transport {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::TransportStatus {
                call: "fetch",
                status,
            });
        }

        let body = response.text().map_err(|source| EtlError::Transport {
            url: self.endpoint.to_string(),
            source,
        })?;
        let parsed: FetchResponse = serde_json::from_str(&body)?;

        info!(
            action = "complete",
            component = "fetch",
            record_count = parsed.data.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Fetch completed"
        );
        Ok(parsed.data)
    }

    /// POST the derived report as JSON. One attempt, no retry.
    ///
    /// A non-success status is a transport failure; a success status with
    /// an empty or non-JSON body means the sink did not acknowledge the
    /// submission. Returns the acknowledgement document on success.
    pub fn submit_report(&self, payload: &SubmissionPayload) -> Result<serde_json::Value> {
        let start_time = Instant::now();
        info!(action = "start", component = "submit", url = %self.endpoint, "Submitting report");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .map_err(|source| EtlError::Transport {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::TransportStatus {
                call: "submit",
                status,
            });
        }

        let body = response.text().map_err(|source| EtlError::Transport {
            url: self.endpoint.to_string(),
            source,
        })?;
        if body.trim().is_empty() {
            warn!(action = "reject", component = "submit", "Sink returned an empty acknowledgement");
            return Err(EtlError::Submission("empty acknowledgement body".to_string()));
        }

        let ack: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            EtlError::Submission(format!("unparsable acknowledgement body: {}", e))
        })?;

        info!(
            action = "complete",
            component = "submit",
            duration_ms = start_time.elapsed().as_millis(),
            acknowledgement = %ack,
            "Submission acknowledged"
        );
        Ok(ack)
    }
}
