//! Encounter-group composite extraction.

use std::collections::BTreeSet;

use sheetpress_shared::{DocumentKind, HostDocument};

use super::error::ExtractError;
use super::npc::{extract_npc, NpcSheet};
use crate::infrastructure::ports::DocumentStore;

/// The encounter record: one NPC sheet per unique member.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterSheet {
    pub name: String,
    pub members: Vec<NpcSheet>,
}

/// Extract an encounter group.
///
/// Member actors resolve through the host's async member-resolution API
/// when available, falling back to a manual walk of the member-reference
/// list. Members deduplicate by stable identity (UUID, else ID, else
/// name). A member that fails to extract is logged and skipped; it never
/// aborts the rest of the group.
pub async fn extract_encounter(
    doc: &HostDocument,
    store: &dyn DocumentStore,
) -> Result<EncounterSheet, ExtractError> {
    if doc.kind() != DocumentKind::Group {
        return Err(ExtractError::unsupported_kind("encounter group", "group"));
    }

    let resolved = match store.group_members(doc).await {
        Ok(members) if !members.is_empty() => members,
        Ok(_) => manual_member_walk(doc, store).await,
        Err(e) => {
            tracing::debug!(error = %e, "member-resolution API unavailable, walking references");
            manual_member_walk(doc, store).await
        }
    };

    let mut seen = BTreeSet::new();
    let mut members = Vec::new();
    for member in resolved {
        if !seen.insert(member.identity()) {
            continue;
        }
        match extract_npc(&member) {
            Ok(sheet) => members.push(sheet),
            Err(e) => {
                tracing::warn!(member = %member.name(), error = %e, "skipping group member");
            }
        }
    }

    Ok(EncounterSheet {
        name: doc.name().to_string(),
        members,
    })
}

async fn manual_member_walk(doc: &HostDocument, store: &dyn DocumentStore) -> Vec<HostDocument> {
    let mut members = Vec::new();
    for reference in doc.member_refs() {
        match store.get(&reference).await {
            Ok(member) => members.push(member),
            Err(e) => {
                tracing::warn!(reference = %reference, error = %e, "skipping unresolvable member");
            }
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockDocumentStore, PortError};
    use serde_json::json;

    fn group() -> HostDocument {
        HostDocument::new(json!({
            "type": "group",
            "name": "Ambush",
            "system": {"members": ["Actor.gob1", "Actor.gob2"]}
        }))
    }

    fn goblin(uuid: &str, name: &str) -> HostDocument {
        HostDocument::new(json!({
            "uuid": uuid,
            "type": "npc",
            "name": name,
            "system": {"details": {"cr": 0.25}}
        }))
    }

    #[tokio::test]
    async fn test_rejects_non_group() {
        let store = MockDocumentStore::new();
        let doc = HostDocument::new(json!({"type": "npc", "name": "Solo"}));
        assert!(extract_encounter(&doc, &store).await.is_err());
    }

    #[tokio::test]
    async fn test_prefers_member_resolution_api() {
        let mut store = MockDocumentStore::new();
        store
            .expect_group_members()
            .returning(|_| Ok(vec![goblin("Actor.gob1", "Goblin A")]));
        store.expect_get().never();
        let sheet = extract_encounter(&group(), &store).await.expect("sheet");
        assert_eq!(sheet.members.len(), 1);
        assert_eq!(sheet.members[0].name, "Goblin A");
    }

    #[tokio::test]
    async fn test_falls_back_to_reference_walk() {
        let mut store = MockDocumentStore::new();
        store
            .expect_group_members()
            .returning(|_| Err(PortError::Unavailable("no member API".into())));
        store
            .expect_get()
            .returning(|uuid| Ok(goblin(uuid, "Walked")));
        let sheet = extract_encounter(&group(), &store).await.expect("sheet");
        assert_eq!(sheet.members.len(), 2);
    }

    #[tokio::test]
    async fn test_members_dedup_by_identity() {
        let mut store = MockDocumentStore::new();
        store.expect_group_members().returning(|_| {
            Ok(vec![
                goblin("Actor.gob1", "Goblin"),
                goblin("Actor.gob1", "Goblin"),
                goblin("Actor.gob2", "Hobgoblin"),
            ])
        });
        let sheet = extract_encounter(&group(), &store).await.expect("sheet");
        assert_eq!(sheet.members.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_member_skipped_not_fatal() {
        let mut store = MockDocumentStore::new();
        store.expect_group_members().returning(|_| {
            Ok(vec![
                // A nested group cannot extract as an NPC
                HostDocument::new(json!({"uuid": "Actor.bad", "type": "group", "name": "Nested"})),
                goblin("Actor.gob1", "Survivor"),
            ])
        });
        let sheet = extract_encounter(&group(), &store).await.expect("sheet");
        assert_eq!(sheet.members.len(), 1);
        assert_eq!(sheet.members[0].name, "Survivor");
    }
}
