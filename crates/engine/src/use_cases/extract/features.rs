//! Feature extraction - grouped by category in canonical order.

use serde_json::Value;
use sheetpress_domain::{ActionEntry, ActivationType};
use sheetpress_shared::HostDocument;

use super::fields::{is_favorite, limited_uses};
use super::text::clean_text;

/// Category label a feature is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureCategory {
    Class,
    Race,
    Background,
    Feat,
    Monster,
    /// Unrecognized categories sort last
    Other,
}

impl FeatureCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureCategory::Class => "Class Features",
            FeatureCategory::Race => "Racial Traits",
            FeatureCategory::Background => "Background Features",
            FeatureCategory::Feat => "Feats",
            FeatureCategory::Monster => "Monster Features",
            FeatureCategory::Other => "Other Features",
        }
    }

    fn from_item(item: &HostDocument) -> Option<Self> {
        match item.raw().get("type").and_then(Value::as_str)? {
            "race" => Some(FeatureCategory::Race),
            "background" => Some(FeatureCategory::Background),
            "feat" => Some(match item.str_at("type.value").unwrap_or("") {
                "class" => FeatureCategory::Class,
                "race" => FeatureCategory::Race,
                "background" => FeatureCategory::Background,
                "feat" => FeatureCategory::Feat,
                "monster" => FeatureCategory::Monster,
                _ => FeatureCategory::Other,
            }),
            _ => None,
        }
    }
}

/// One category's features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGroup {
    pub category: FeatureCategory,
    pub entries: Vec<ActionEntry>,
}

/// Extract feature sub-items grouped by category.
///
/// Groups follow the canonical category sequence with unrecognized
/// categories last; within a group, favorites lead and the rest sort
/// alphabetically.
pub fn extract_features(doc: &HostDocument) -> Vec<FeatureGroup> {
    let mut groups: Vec<FeatureGroup> = Vec::new();
    for item in doc.items() {
        let Some(category) = FeatureCategory::from_item(&item) else {
            continue;
        };
        let entry = feature_entry(doc, &item);
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.entries.push(entry),
            None => groups.push(FeatureGroup {
                category,
                entries: vec![entry],
            }),
        }
    }
    for group in &mut groups {
        group.entries.sort_by(|a, b| {
            b.favorite
                .cmp(&a.favorite)
                .then_with(|| a.name.cmp(&b.name))
        });
    }
    groups.sort_by_key(|g| g.category);
    groups
}

fn feature_entry(doc: &HostDocument, item: &HostDocument) -> ActionEntry {
    let description = item
        .str_at("description.value")
        .map(|raw| clean_text(raw, doc))
        .unwrap_or_default();
    let activation: ActivationType = item
        .str_at("activation.type")
        .and_then(|t| t.parse().ok())
        .unwrap_or_default();
    ActionEntry {
        name: item.name().to_string(),
        description,
        activation,
        uses: limited_uses(item.system_at("uses")),
        attack: None,
        favorite: is_favorite(item),
    }
}
