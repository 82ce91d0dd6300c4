//! HTTP — MISP REST API client.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;

use super::client::{SubmitError, SubmitFuture, Submitter};
use crate::conf::MispConfig;
use crate::misp::model::EventEnvelope;
use crate::misp::MispEvent;

/// Text MISP puts in the error payload when an identical event exists.
const DUPLICATE_MARKER: &str = "Event already exists";

const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct MispClient {
    http: reqwest::Client,
    endpoint: String,
    authkey: String,
}

impl MispClient {
    pub fn new(config: &MispConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/events/add", config.url.trim_end_matches('/')),
            authkey: config.authkey.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn add_event(&self, event: &MispEvent) -> Result<String, SubmitError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authkey)
            .header(ACCEPT, "application/json")
            .json(&EventEnvelope { event })
            .send()
            .await
            .map_err(|e| SubmitError::Transient(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transient(e.to_string()))?;

        classify_response(status, &body)
    }
}

impl Submitter for MispClient {
    fn submit<'a>(&'a self, event: &'a MispEvent) -> SubmitFuture<'a> {
        Box::pin(self.add_event(event))
    }
}

/// Map a MISP response to the new event id or a [`SubmitError`].
///
/// A response is a failure when the status is not 2xx or the payload carries
/// an `errors` key. Only failures are checked for the duplicate marker, since
/// a created event echoes attribute values taken from the log line. Client
/// errors are fatal except 408 and 429; everything else is transient.
fn classify_response(status: StatusCode, body: &str) -> Result<String, SubmitError> {
    let value = serde_json::from_str::<Value>(body).ok();
    let errors = value.as_ref().and_then(|v| v.get("errors"));

    if !status.is_success() || errors.is_some() {
        if body.contains(DUPLICATE_MARKER) {
            return Err(SubmitError::Duplicate(truncate(body)));
        }
        if status.is_success() {
            let detail = errors.map(Value::to_string).unwrap_or_default();
            return Err(SubmitError::Transient(truncate(&detail)));
        }

        let detail = format!("{}: {}", status, truncate(body));
        let retryable = matches!(status, StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS);
        return if status.is_client_error() && !retryable {
            Err(SubmitError::Fatal(detail))
        } else {
            Err(SubmitError::Transient(detail))
        };
    }

    let value = value.ok_or_else(|| SubmitError::Transient(format!("invalid response body: {}", truncate(body))))?;
    match value.pointer("/Event/id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(SubmitError::Transient("response has no Event.id".to_string())),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}
