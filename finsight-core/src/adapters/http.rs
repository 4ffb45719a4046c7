//! Backend API activity source
//!
//! Fetches `/financial-activities/` from the business backend, following
//! pagination links until every page has been read.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value as JsonValue;

use super::json::decode_payload;
use crate::domain::result;
use crate::domain::FinancialActivity;
use crate::ports::ActivitySource;

const ACTIVITIES_PATH: &str = "financial-activities/";
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Guard against servers that keep returning a `next` link
const MAX_PAGES: usize = 500;

/// HTTP client for the backend's activity endpoint
#[derive(Debug)]
pub struct HttpActivitySource {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpActivitySource {
    /// Create a source for the API rooted at `api_url` (e.g. `http://host:8000/api`)
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let base = api_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("API URL must start with http:// or https://: {}", api_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", base, ACTIVITIES_PATH),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch every page of activities
    pub fn get_activities(&self) -> Result<Vec<FinancialActivity>> {
        let mut activities = Vec::new();
        let mut skipped = 0;
        let mut url = Some(self.endpoint.clone());
        let mut pages = 0;

        while let Some(current) = url.take() {
            if pages == MAX_PAGES {
                log::warn!("Stopping after {} pages of activities", MAX_PAGES);
                break;
            }
            pages += 1;

            let payload = self.get_json(&current)?;
            let page = decode_payload(payload)
                .with_context(|| format!("Unexpected response from {}", current))?;

            activities.extend(page.activities);
            skipped += page.skipped;
            url = page.next;
        }

        if skipped > 0 {
            log::warn!("Skipped {} undecodable activity records", skipped);
        }
        log::info!("Fetched {} activities in {} page(s)", activities.len(), pages);
        Ok(activities)
    }

    fn get_json(&self, url: &str) -> Result<JsonValue> {
        log::debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| self.map_request_error(e))?;
        self.check_response_status(&response)?;

        response
            .json()
            .context("Failed to parse activities response as JSON")
    }

    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!(
                "Connection timed out after {} seconds",
                REQUEST_TIMEOUT_SECS
            )
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to the backend at {}", self.endpoint)
        } else {
            anyhow::anyhow!("Activity request failed: {}", error)
        }
    }

    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            401 | 403 => anyhow::bail!(
                "The backend rejected the request (HTTP {}). Check the configured API token.",
                response.status().as_u16()
            ),
            404 => anyhow::bail!("Activity endpoint not found: {}", self.endpoint),
            status => anyhow::bail!("Backend API error: HTTP {}", status),
        }
    }
}

impl ActivitySource for HttpActivitySource {
    fn name(&self) -> &str {
        "api"
    }

    fn fetch(&self) -> result::Result<Vec<FinancialActivity>> {
        self.get_activities()
            .map_err(|e| result::Error::http(format!("{:#}", e)))
    }
}
