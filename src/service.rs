use crate::protocol::{
    interpret_submission, CandidateList, RequestPayload, RequestResponse, RequestResult,
    SubmissionOutcome, SystemInfo,
};
use dotenvy::dotenv;
use std::{env, time::Duration};
use tracing::debug;

pub const BASE_URL_VAR: &str = "MACHAON_BASE_URL";

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Blocking HTTP client for the MachaonWeb REST endpoints. One instance per
/// session; the base URL is fixed at construction.
#[derive(Debug)]
pub struct ServiceClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ServiceClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| format!("Could not build the service HTTP client: {e}"))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL from the `MACHAON_BASE_URL` environment variable (a `.env`
    /// file is honored).
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        let base_url = env::var(BASE_URL_VAR)
            .map_err(|_| format!("The service base URL is not configured; set {BASE_URL_VAR}"))?;
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /lists` — the preset candidate lists offered by the service.
    pub fn candidate_lists(&self) -> Result<Vec<CandidateList>, String> {
        let url = format!("{}/lists", self.base_url);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("Could not reach {url}: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("Candidate list request failed (status={status})"));
        }
        response
            .json()
            .map_err(|e| format!("Invalid candidate list payload: {e}"))
    }

    /// `GET /info` — current network counters, for display only.
    pub fn system_info(&self) -> Result<SystemInfo, String> {
        let url = format!("{}/info", self.base_url);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("Could not reach {url}: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("Info request failed (status={status})"));
        }
        response
            .json()
            .map_err(|e| format!("Invalid info payload: {e}"))
    }

    /// `POST /request` — submit a composed request once. Transport failures
    /// and unrecognized payloads fold into the unknown-error outcome; nothing
    /// is retried here.
    pub fn submit(&self, payload: &RequestPayload) -> SubmissionOutcome {
        let url = format!("{}/request", self.base_url);
        debug!("POST {url}");
        let response = match self.client.post(&url).json(payload).send() {
            Ok(response) => response,
            Err(e) => {
                debug!("Submission transport failure: {e}");
                return SubmissionOutcome::UnknownError;
            }
        };
        let status = response.status();
        if !status.is_success() {
            debug!("Submission rejected at transport level (status={status})");
            return SubmissionOutcome::UnknownError;
        }
        match response.json::<RequestResponse>() {
            Ok(parsed) => interpret_submission(&self.base_url, &parsed),
            Err(e) => {
                debug!("Invalid submission response: {e}");
                SubmissionOutcome::UnknownError
            }
        }
    }

    /// `GET /resultdata/{hash}/{id}` — the stored request plus its quick-view
    /// output filenames.
    pub fn result_data(&self, hash: &str, request_id: i64) -> Result<RequestResult, String> {
        let url = format!("{}/resultdata/{}/{}", self.base_url, hash, request_id);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| format!("Could not reach {url}: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("Result request failed (status={status})"));
        }
        response
            .json()
            .map_err(|e| format!("Invalid result payload: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ServiceClient::new("https://example.org/").unwrap();
        assert_eq!(client.base_url(), "https://example.org");
        let client = ServiceClient::new("https://example.org").unwrap();
        assert_eq!(client.base_url(), "https://example.org");
    }
}
