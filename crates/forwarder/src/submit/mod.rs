//! Submit module — delivery of built events to MISP.
//!
//! Every caller goes through the [`Submitter`] trait.
//! `http.rs` talks to the MISP REST API, `dry_run.rs` only logs, and
//! `fake.rs` provides a scripted test double.

pub mod client;
pub mod retry;
pub mod http;
pub mod dry_run;
pub mod fake;

pub use client::{SubmitError, SubmitFuture, Submitter};
pub use retry::{submit_with_retry, SubmitOutcome};
pub use http::MispClient;
pub use dry_run::DryRunSubmitter;
