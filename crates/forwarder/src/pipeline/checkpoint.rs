//! Checkpoint — name of the last processed log file, persisted between runs.

use std::path::{Path, PathBuf};

use super::PipelineError;

#[derive(Debug, Clone)]
pub struct Checkpoint {
    path: PathBuf,
}

impl Checkpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last processed file name; `None` on a first run. Creates an empty
    /// checkpoint file when none exists yet.
    pub async fn load(&self) -> Result<Option<String>, PipelineError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if !exists {
            tokio::fs::write(&self.path, "")
                .await
                .map_err(|source| self.io_error(source))?;
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        let name = contents.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub async fn save(&self, file_name: &str) -> Result<(), PipelineError> {
        tokio::fs::write(&self.path, file_name)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> PipelineError {
        PipelineError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_load_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::new(dir.path().join("last_file_name"));

        assert_eq!(checkpoint.load().await.unwrap(), None);
        assert!(checkpoint.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = Checkpoint::new(dir.path().join("last_file_name"));

        checkpoint.save("fortigate-2024-01-02.log").await.unwrap();
        assert_eq!(checkpoint.load().await.unwrap().as_deref(), Some("fortigate-2024-01-02.log"));
    }

    #[tokio::test]
    async fn test_load_trims_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_file_name");
        std::fs::write(&path, "fortigate-2024-01-02.log\n").unwrap();

        let checkpoint = Checkpoint::new(path);
        assert_eq!(checkpoint.load().await.unwrap().as_deref(), Some("fortigate-2024-01-02.log"));
    }

    #[tokio::test]
    async fn test_load_in_missing_directory_fails() {
        let checkpoint = Checkpoint::new("/nonexistent/dir/last_file_name");
        assert!(matches!(checkpoint.load().await, Err(PipelineError::Io { .. })));
    }
}
