//! Document-query port - the host's async document API.

use async_trait::async_trait;
use sheetpress_shared::HostDocument;

use super::error::PortError;

/// Access to the host's document graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Resolve a document by UUID (world actor or compendium entry).
    async fn get(&self, uuid: &str) -> Result<HostDocument, PortError>;

    /// Resolve the member actors of a group document.
    ///
    /// Preferred over walking the member-reference list manually; newer
    /// host versions expose this directly. Implementations return members
    /// in the group's declared order without deduplication - callers
    /// dedup by stable identity.
    async fn group_members(&self, group: &HostDocument) -> Result<Vec<HostDocument>, PortError>;
}
