//! Report — per-run summary of processed files and submitted events.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::file::FileSummary;

const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub files_total: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub events_submitted: usize,
    pub events_duplicate: usize,
    /// `file: error` for every failed file.
    pub failures: Vec<String>,
}

impl RunReport {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            files_total: 0,
            files_succeeded: 0,
            files_failed: 0,
            events_submitted: 0,
            events_duplicate: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self, summary: &FileSummary) {
        self.files_total += 1;
        self.files_succeeded += 1;
        self.events_submitted += summary.submitted();
        self.events_duplicate += summary.duplicates;
    }

    pub fn record_failure(&mut self, file_name: &str, error: &dyn std::error::Error) {
        self.files_total += 1;
        self.files_failed += 1;
        self.failures.push(format!("{}: {}", file_name, error));
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }

    /// Human readable summary, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Run started: {}", self.started_at.format(TIME_FORMAT)),
            format!(
                "Events submitted: {} ({} already registered)",
                self.events_submitted, self.events_duplicate
            ),
            format!("Files succeeded / total: {} / {}", self.files_succeeded, self.files_total),
            format!("Files failed / total: {} / {}", self.files_failed, self.files_total),
        ];
        lines.extend(self.failures.iter().map(|f| format!("  failed: {}", f)));
        if let Some(finished) = self.finished_at {
            lines.push(format!("Run finished: {}", finished.format(TIME_FORMAT)));
        }
        lines
    }

    pub fn log(&self) {
        for line in self.lines() {
            if self.has_failures() {
                warn!("{}", line);
            } else {
                info!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut report = RunReport::start();
        report.record_success(&FileSummary {
            lines: 10,
            skipped: 3,
            registered: 6,
            duplicates: 1,
        });
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        report.record_failure("b.log", &err);

        assert_eq!(report.files_total, 2);
        assert_eq!(report.files_succeeded, 1);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.events_submitted, 7);
        assert_eq!(report.events_duplicate, 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_lines() {
        let mut report = RunReport::start();
        report.record_success(&FileSummary {
            registered: 2,
            ..Default::default()
        });
        report.finish();

        let lines = report.lines();
        assert!(lines[0].starts_with("Run started: "));
        assert_eq!(lines[1], "Events submitted: 2 (0 already registered)");
        assert_eq!(lines[2], "Files succeeded / total: 1 / 1");
        assert_eq!(lines[3], "Files failed / total: 0 / 1");
        assert!(lines[4].starts_with("Run finished: "));
    }

    #[test]
    fn test_failures_listed() {
        let mut report = RunReport::start();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        report.record_failure("a.log", &err);

        assert!(report.lines().iter().any(|l| l == "  failed: a.log: boom"));
    }
}
