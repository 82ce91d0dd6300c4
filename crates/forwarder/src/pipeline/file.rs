use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, trace};

use super::record::{LineOutcome, RecordProcessor};
use super::PipelineError;
use crate::conf::RetryConfig;
use crate::submit::{submit_with_retry, SubmitOutcome, Submitter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub lines: usize,
    /// Lines without an anchor or without a label.
    pub skipped: usize,
    pub registered: usize,
    pub duplicates: usize,
}

impl FileSummary {
    /// Events handed to MISP, including ones it already had.
    pub fn submitted(&self) -> usize {
        self.registered + self.duplicates
    }
}

/// Process one log file in line order.
///
/// Each event is submitted (with retries) before the next line is read.
/// A failed submission aborts the rest of the file.
pub async fn process_file(
    path: &Path,
    processor: &RecordProcessor,
    submitter: &dyn Submitter,
    retry: &RetryConfig,
) -> Result<FileSummary, PipelineError> {
    let io_error = |source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(io_error)?;
    let mut segments = BufReader::new(file).split(b'\n');
    let mut summary = FileSummary::default();

    while let Some(raw) = segments.next_segment().await.map_err(io_error)? {
        summary.lines += 1;
        let line_number = summary.lines;

        // Non-UTF8 bytes are replaced rather than failing the file
        let decoded = String::from_utf8_lossy(&raw);
        let line = decoded.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let record = match processor.process(line) {
            LineOutcome::Event(record) => record,
            LineOutcome::NotARecord => {
                summary.skipped += 1;
                trace!(line_number, "No record anchor, skipping line");
                continue;
            }
            LineOutcome::Unlabelled(fields) => {
                summary.skipped += 1;
                trace!(
                    line_number,
                    fields = %serde_json::to_string(&fields).unwrap_or_default(),
                    "No label for record, skipping line"
                );
                continue;
            }
        };

        debug!(line_number, message_id = %record.message_id, label = %record.label, "Submitting event");
        match submit_with_retry(submitter, &record.event, retry).await {
            Ok(SubmitOutcome::Registered(_)) => summary.registered += 1,
            Ok(SubmitOutcome::AlreadyRegistered) => summary.duplicates += 1,
            Err(source) => {
                return Err(PipelineError::Submission {
                    path: path.to_path_buf(),
                    line_number,
                    message_id: record.message_id,
                    line: line.to_string(),
                    source,
                });
            }
        }
    }

    Ok(summary)
}
