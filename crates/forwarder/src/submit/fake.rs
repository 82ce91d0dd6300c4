//! Fake — scripted test double for event submission.
//!
//! [`FakeSubmitter`] answers from a queue of canned results and records
//! every event it accepted, so pipeline code can be exercised without a
//! MISP instance.

use std::collections::VecDeque;

use tokio::sync::Mutex;

use super::client::{SubmitError, SubmitFuture, Submitter};
use crate::misp::MispEvent;

#[derive(Default)]
struct Inner {
    responses: VecDeque<Result<String, SubmitError>>,
    accepted: Vec<MispEvent>,
    attempts: usize,
    next_id: u64,
}

/// A fake submitter for deterministic testing.
///
/// Queued responses are consumed in order; once the queue is empty every
/// submission succeeds with sequential ids starting at 1.
#[derive(Default)]
pub struct FakeSubmitter {
    inner: Mutex<Inner>,
}

impl FakeSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of a future submission.
    pub async fn push_response(&self, response: Result<String, SubmitError>) {
        self.inner.lock().await.responses.push_back(response);
    }

    /// Events that were answered with `Ok`, in submission order.
    pub async fn accepted(&self) -> Vec<MispEvent> {
        self.inner.lock().await.accepted.clone()
    }

    /// Number of `submit` calls, including failed ones.
    pub async fn attempts(&self) -> usize {
        self.inner.lock().await.attempts
    }
}

impl Submitter for FakeSubmitter {
    fn submit<'a>(&'a self, event: &'a MispEvent) -> SubmitFuture<'a> {
        Box::pin(async move {
            let mut state = self.inner.lock().await;
            state.attempts += 1;

            let response = match state.responses.pop_front() {
                Some(response) => response,
                None => {
                    state.next_id += 1;
                    Ok(state.next_id.to_string())
                }
            };

            if response.is_ok() {
                state.accepted.push(event.clone());
            }
            response
        })
    }
}

/// Minimal event used by submission tests.
#[cfg(test)]
pub fn sample_event() -> MispEvent {
    use crate::misp::{MispAttribute, MispTag};

    MispEvent {
        info: "[FortiGate] 2024-01-01T10:00:00+0900 AV(Web)".to_string(),
        date: "2024-01-01T10:00:00+0900".to_string(),
        distribution: "2".to_string(),
        threat_level_id: "4".to_string(),
        analysis: "0".to_string(),
        published: true,
        sharing_group_id: None,
        tags: vec![MispTag::new("fortigate")],
        attributes: vec![MispAttribute::new("Other", "datetime", "2024-01-01T10:00:00+0900")
            .with_correlation_disabled(true)],
    }
}
