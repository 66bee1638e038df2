//! Output adapters for the CLI binary.

use std::path::PathBuf;

use async_trait::async_trait;
use sheetpress_shared::print_options::PrintMode;

use super::ports::{Notifier, OutputPort, PortError};

/// Writes the rendered document to a file instead of a browser window.
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OutputPort for FileOutput {
    async fn open(&self, html: &str, mode: PrintMode) -> Result<(), PortError> {
        tokio::fs::write(&self.path, html)
            .await
            .map_err(|e| PortError::io("write_output", e))?;
        match mode {
            PrintMode::Print => {
                tracing::info!(path = %self.path.display(), "sheet written; print it from your browser");
            }
            PrintMode::Preview => {
                tracing::info!(path = %self.path.display(), "sheet written");
            }
        }
        Ok(())
    }
}

/// Notifier that surfaces messages on the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_output_writes_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sheet.html");
        let output = FileOutput::new(&path);
        output
            .open("<!DOCTYPE html><html></html>", PrintMode::Preview)
            .await
            .expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
