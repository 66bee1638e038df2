//! Output and notification ports.

use async_trait::async_trait;
use sheetpress_shared::print_options::PrintMode;

use super::error::PortError;

/// The output window the rendered document is opened in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputPort: Send + Sync {
    /// Open the rendered HTML document.
    ///
    /// Returns [`PortError::Blocked`] when the window cannot be created
    /// (popup blocker); callers surface that as a warning, not a failure.
    async fn open(&self, html: &str, mode: PrintMode) -> Result<(), PortError>;
}

/// User-visible notifications surfaced by the orchestrator.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}
