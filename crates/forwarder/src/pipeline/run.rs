//! Run — discover pending log files and process them in name order.

use std::path::Path;

use tracing::{error, info};

use super::checkpoint::Checkpoint;
use super::file::process_file;
use super::record::RecordProcessor;
use super::report::RunReport;
use super::PipelineError;
use crate::conf::ForwarderConfig;
use crate::submit::Submitter;

/// Regular files in `dir` whose names sort after `last`, in name order.
pub async fn pending_files(dir: &Path, last: Option<&str>) -> Result<Vec<String>, PipelineError> {
    let io_error = |source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        if !entry.file_type().await.map_err(io_error)?.is_file() {
            continue;
        }
        // Non-UTF8 file names cannot be compared against the checkpoint
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if last.is_some_and(|last| name.as_str() <= last) {
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Process every pending file once.
///
/// A failing file is recorded in the report and the run moves on to the
/// next one. Afterwards the checkpoint is advanced to the last file
/// attempted. Only checkpoint and directory errors fail the run itself.
pub async fn run(config: &ForwarderConfig, submitter: &dyn Submitter) -> Result<RunReport, PipelineError> {
    let mut report = RunReport::start();
    info!("Run started at {}", report.started_at);

    let checkpoint = Checkpoint::new(&config.state_file);
    let last = checkpoint.load().await?;
    let files = pending_files(&config.log_dir, last.as_deref()).await?;
    info!(
        "{} pending file(s) in {} (last processed: {})",
        files.len(),
        config.log_dir.display(),
        last.as_deref().unwrap_or("none")
    );

    let processor = RecordProcessor::from_config(config);
    for name in &files {
        let path = config.log_dir.join(name);
        match process_file(&path, &processor, submitter, &config.retry).await {
            Ok(summary) => {
                info!(
                    file = %name,
                    lines = summary.lines,
                    registered = summary.registered,
                    duplicates = summary.duplicates,
                    skipped = summary.skipped,
                    "Processed file"
                );
                report.record_success(&summary);
            }
            Err(e) => {
                error!(file = %name, "Failed to process file: {}", e);
                report.record_failure(name, &e);
            }
        }
    }

    if let Some(last_file) = files.last() {
        checkpoint.save(last_file).await?;
    }

    report.finish();
    Ok(report)
}
