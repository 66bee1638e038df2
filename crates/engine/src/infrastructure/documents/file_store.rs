//! File-backed document store.
//!
//! Backs the CLI binary and tests: every `*.json` file in a directory is
//! one host document, indexed by UUID, id, and name so lookups mirror the
//! host's resolution order.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use sheetpress_shared::HostDocument;

use super::super::ports::{DocumentStore, PortError};

/// In-memory index over a directory of document JSON files.
pub struct FileDocumentStore {
    by_reference: HashMap<String, Value>,
}

impl FileDocumentStore {
    /// Load every `*.json` file under `dir`.
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self, PortError> {
        let mut by_reference = HashMap::new();
        let mut entries = tokio::fs::read_dir(dir.as_ref())
            .await
            .map_err(|e| PortError::io("read_dir", e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PortError::io("read_dir", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| PortError::io("read_file", e))?;
            let value: Value =
                serde_json::from_str(&text).map_err(|e| PortError::serialization(e))?;
            Self::index(&mut by_reference, value);
        }
        Ok(Self { by_reference })
    }

    /// Build a store directly from document values (tests).
    pub fn from_documents(documents: Vec<Value>) -> Self {
        let mut by_reference = HashMap::new();
        for value in documents {
            Self::index(&mut by_reference, value);
        }
        Self { by_reference }
    }

    fn index(by_reference: &mut HashMap<String, Value>, value: Value) {
        let doc = HostDocument::new(value.clone());
        if let Some(uuid) = doc.uuid() {
            by_reference.insert(uuid.to_string(), value.clone());
        }
        if let Some(id) = doc.id() {
            by_reference.insert(id.to_string(), value.clone());
        }
        if !doc.name().is_empty() {
            by_reference.insert(doc.name().to_string(), value);
        }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get(&self, uuid: &str) -> Result<HostDocument, PortError> {
        self.by_reference
            .get(uuid)
            .cloned()
            .map(HostDocument::new)
            .ok_or_else(|| PortError::not_found(uuid))
    }

    async fn group_members(&self, group: &HostDocument) -> Result<Vec<HostDocument>, PortError> {
        let mut members = Vec::new();
        for reference in group.member_refs() {
            match self.get(&reference).await {
                Ok(doc) => members.push(doc),
                Err(e) => {
                    tracing::warn!(reference = %reference, error = %e, "skipping unresolvable group member");
                }
            }
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_lookup_by_uuid_id_and_name() {
        let store = FileDocumentStore::from_documents(vec![json!({
            "uuid": "Actor.abc",
            "_id": "abc",
            "name": "Goblin",
            "type": "npc"
        })]);
        for reference in ["Actor.abc", "abc", "Goblin"] {
            let doc = store.get(reference).await.expect("resolves");
            assert_eq!(doc.name(), "Goblin");
        }
        assert!(store.get("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_group_members_skip_unresolvable() {
        let store = FileDocumentStore::from_documents(vec![
            json!({"uuid": "Actor.a", "name": "A", "type": "npc"}),
            json!({
                "uuid": "Actor.g",
                "name": "Warband",
                "type": "group",
                "system": {"members": ["Actor.a", "Actor.missing"]}
            }),
        ]);
        let group = store.get("Actor.g").await.expect("group");
        let members = store.group_members(&group).await.expect("members");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name(), "A");
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("actor.json");
        tokio::fs::write(&path, r#"{"uuid": "Actor.x", "name": "X", "type": "character"}"#)
            .await
            .expect("write");
        let store = FileDocumentStore::load(dir.path()).await.expect("load");
        assert_eq!(store.get("Actor.x").await.expect("get").name(), "X");
    }
}
