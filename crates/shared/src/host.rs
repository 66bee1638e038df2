//! Read-only boundary over the host's loosely-typed documents
//!
//! The host exposes actor/item/group documents as nested JSON whose shape
//! drifts across ecosystem versions. All raw access goes through this
//! wrapper so extraction logic never touches `serde_json::Value` paths
//! directly; a missing field surfaces as a single well-defined `None`
//! instead of scattered defensive chains. The wrapper never mutates the
//! underlying document.

use serde_json::Value;

/// Top-level document kind as declared by the host's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Character,
    Npc,
    Group,
    Unknown,
}

/// A read-only view over one host document.
#[derive(Debug, Clone)]
pub struct HostDocument {
    value: Value,
}

impl HostDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// The raw underlying JSON.
    pub fn raw(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> DocumentKind {
        match self.value.get("type").and_then(Value::as_str) {
            Some("character") => DocumentKind::Character,
            Some("npc") => DocumentKind::Npc,
            Some("group") => DocumentKind::Group,
            _ => DocumentKind::Unknown,
        }
    }

    pub fn name(&self) -> &str {
        self.value.get("name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn id(&self) -> Option<&str> {
        self.value.get("_id").and_then(Value::as_str)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.value.get("uuid").and_then(Value::as_str)
    }

    /// Stable identity for deduplication: UUID, else ID, else name.
    pub fn identity(&self) -> String {
        self.uuid()
            .or_else(|| self.id())
            .unwrap_or_else(|| self.name())
            .to_string()
    }

    /// The game-system identifier the document was authored for.
    pub fn system_id(&self) -> &str {
        self.value
            .get("systemId")
            .and_then(Value::as_str)
            .unwrap_or("dnd5e")
    }

    /// Resolve a dot-separated path from the document root.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        let mut current = &self.value;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Resolve a dot-separated path under the `system` block.
    pub fn system_at(&self, path: &str) -> Option<&Value> {
        let mut current = self.value.get("system")?;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.system_at(path).and_then(Value::as_str)
    }

    pub fn i64_at(&self, path: &str) -> Option<i64> {
        self.system_at(path).and_then(coerce_i64)
    }

    pub fn f64_at(&self, path: &str) -> Option<f64> {
        self.system_at(path).and_then(coerce_f64)
    }

    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.system_at(path).and_then(coerce_bool)
    }

    /// Embedded sub-items (class levels, spells, features, equipment).
    pub fn items(&self) -> Vec<HostDocument> {
        match self.value.get("items") {
            Some(Value::Array(items)) => items.iter().cloned().map(HostDocument::new).collect(),
            _ => Vec::new(),
        }
    }

    /// Member references carried by a group document. Each entry may be a
    /// bare UUID string, `{"uuid": ...}`, or `{"actor": {"uuid": ...}}`.
    pub fn member_refs(&self) -> Vec<String> {
        let members = match self.system_at("members") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Vec::new(),
        };
        members
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => entry
                    .get("uuid")
                    .or_else(|| entry.get("actor").and_then(|a| a.get("uuid")))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                other => {
                    tracing::debug!(entry = %other, "unrecognized member reference shape");
                    None
                }
            })
            .collect()
    }

    /// Host-provided pre-computed presentation context, when the active
    /// ecosystem version exposes one (already-resolved action/trait text).
    pub fn presentation(&self) -> Option<&Value> {
        self.value.get("presentation").filter(|v| !v.is_null())
    }

    /// Resolve a roll-data lookup path ("attributes.prof",
    /// "@abilities.wis.mod") against the system block, rendering the
    /// leaf as display text. Unresolved paths yield `None`.
    pub fn roll_data(&self, path: &str) -> Option<String> {
        let path = path.trim_start_matches('@');
        match self.system_at(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Interpret a value as an integer through the ordered fallback chain:
/// plain number, numeric string, `{"value": ...}` wrapper.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(_) => value.get("value").and_then(coerce_i64),
        _ => None,
    }
}

/// Interpret a value as a float through the same fallback chain.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(_) => value.get("value").and_then(coerce_f64),
        _ => None,
    }
}

/// Interpret a value as a boolean; numbers follow the host convention
/// that any non-zero value is set.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().unwrap_or(0.0) != 0.0),
        Value::Object(_) => value.get("value").and_then(coerce_bool),
        _ => None,
    }
}
