//! Pipeline — from log files on disk to submitted MISP events.
//!
//! - `record.rs`: one line → one optional event (pure, synchronous)
//! - `file.rs`: one file, line by line, each event submitted before the next line
//! - `checkpoint.rs`: name of the last processed file
//! - `run.rs`: pending file discovery and the per-run loop
//! - `report.rs`: run summary

pub mod record;
pub mod file;
pub mod checkpoint;
pub mod run;
pub mod report;

pub use record::{LineOutcome, BuiltRecord, RecordProcessor};
pub use file::{process_file, FileSummary};
pub use checkpoint::Checkpoint;
pub use run::{pending_files, run};
pub use report::RunReport;

use std::path::PathBuf;

use thiserror::Error;

use crate::submit::SubmitError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Submission failed at {path}:{line_number} (message id {message_id}): {source}; line: {line}")]
    Submission {
        path: PathBuf,
        line_number: usize,
        message_id: String,
        line: String,
        #[source]
        source: SubmitError,
    },
}
