//! Dry run — logs events instead of submitting them.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use super::client::{SubmitError, SubmitFuture, Submitter};
use crate::misp::MispEvent;

/// Prints each event as JSON and hands back a local sequence number.
#[derive(Debug, Default)]
pub struct DryRunSubmitter {
    count: AtomicU64,
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Submitter for DryRunSubmitter {
    fn submit<'a>(&'a self, event: &'a MispEvent) -> SubmitFuture<'a> {
        Box::pin(async move {
            let json = serde_json::to_string(event)
                .map_err(|e| SubmitError::Fatal(format!("failed to encode event: {}", e)))?;
            let n = self.count.fetch_add(1, Ordering::Relaxed) + 1;
            info!(dry_run = true, "{}", json);
            Ok(format!("dry-run-{}", n))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::fake::sample_event;

    #[tokio::test]
    async fn test_dry_run_counts_events() {
        let dry = DryRunSubmitter::new();
        let event = sample_event();
        assert_eq!(dry.submit(&event).await, Ok("dry-run-1".to_string()));
        assert_eq!(dry.submit(&event).await, Ok("dry-run-2".to_string()));
        assert_eq!(dry.count(), 2);
    }
}
