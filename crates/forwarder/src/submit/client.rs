//! Submitter trait — abstract interface over the event sink.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::misp::MispEvent;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// MISP already holds this event. Not retried; counts as delivered.
    #[error("Event already exists: {0}")]
    Duplicate(String),
    /// Worth retrying: network failures, timeouts, server errors.
    #[error("Transient submission failure: {0}")]
    Transient(String),
    #[error("Submission failed: {0}")]
    Fatal(String),
}

pub type SubmitFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SubmitError>> + Send + 'a>>;

/// Unified async interface over the event sink.
///
/// Object-safe thanks to the `Pin<Box<…>>` return, so the pipeline can hold
/// a `&dyn Submitter` chosen at startup.
pub trait Submitter: Send + Sync {
    /// Submit one event and return the id MISP assigned to it.
    fn submit<'a>(&'a self, event: &'a MispEvent) -> SubmitFuture<'a>;
}
