//! Retry — fixed-interval retry around a single submission.

use std::time::Duration;

use tracing::{info, warn};

use super::client::{SubmitError, Submitter};
use crate::conf::RetryConfig;
use crate::misp::MispEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Registered(String),
    AlreadyRegistered,
}

/// Submit `event`, retrying transient failures.
///
/// Duplicates resolve to [`SubmitOutcome::AlreadyRegistered`]. Once
/// `max_attempts` transient failures have been seen the last one is
/// escalated to [`SubmitError::Fatal`].
pub async fn submit_with_retry(
    submitter: &dyn Submitter,
    event: &MispEvent,
    policy: &RetryConfig,
) -> Result<SubmitOutcome, SubmitError> {
    let max_attempts = policy.max_attempts.max(1);
    let interval = Duration::from_secs(policy.interval_secs);

    let mut attempt = 0;
    loop {
        attempt += 1;
        match submitter.submit(event).await {
            Ok(id) => {
                info!(event_id = %id, "Registered new event");
                return Ok(SubmitOutcome::Registered(id));
            }
            Err(SubmitError::Duplicate(detail)) => {
                info!(%detail, "Event is already registered in MISP");
                return Ok(SubmitOutcome::AlreadyRegistered);
            }
            Err(SubmitError::Transient(detail)) if attempt < max_attempts => {
                warn!(
                    "Submission attempt {}/{} failed: {}; retrying in {}s",
                    attempt, max_attempts, detail, policy.interval_secs
                );
                tokio::time::sleep(interval).await;
            }
            Err(SubmitError::Transient(detail)) => {
                return Err(SubmitError::Fatal(format!(
                    "giving up after {} attempts: {}",
                    attempt, detail
                )));
            }
            Err(fatal) => return Err(fatal),
        }
    }
}
