//! Inventory extraction with one level of container nesting.

use std::collections::BTreeMap;

use serde_json::Value;
use sheetpress_domain::{InventoryItem, ItemKind};
use sheetpress_shared::{coerce_bool, coerce_f64, coerce_i64, HostDocument};

use super::fields::{is_favorite, limited_uses};

const PHYSICAL_TYPES: [&str; 7] = [
    "weapon",
    "equipment",
    "consumable",
    "tool",
    "loot",
    "container",
    "backpack",
];

/// Extract the inventory tree.
///
/// Items whose container reference resolves to a known container nest one
/// level under it; an unresolvable reference leaves the item top-level,
/// never dropped. Top-level non-containers sort favorites-first, then
/// equipped-first, then alphabetically; containers sort alphabetically at
/// the end; container contents sort alphabetically.
pub fn extract_inventory(doc: &HostDocument) -> Vec<InventoryItem> {
    let mut rows: Vec<(InventoryItem, Option<String>)> = Vec::new();
    for item in doc.items() {
        let Some(type_name) = item.raw().get("type").and_then(Value::as_str) else {
            continue;
        };
        if !PHYSICAL_TYPES.contains(&type_name) {
            continue;
        }
        rows.push((inventory_row(&item, type_name), container_ref(&item)));
    }

    let container_ids: Vec<String> = rows
        .iter()
        .filter(|(row, _)| row.is_container())
        .map(|(row, _)| row.id.clone())
        .collect();

    let mut top_level: Vec<InventoryItem> = Vec::new();
    let mut contained: BTreeMap<String, Vec<InventoryItem>> = BTreeMap::new();
    for (row, parent) in rows {
        match parent {
            Some(ref id) if container_ids.contains(id) && !row.is_container() => {
                contained.entry(id.clone()).or_default().push(row);
            }
            // Containers never nest; unresolved references stay top-level.
            _ => top_level.push(row),
        }
    }

    for item in &mut top_level {
        if let Some(mut contents) = contained.remove(&item.id) {
            contents.sort_by(|a, b| a.name.cmp(&b.name));
            item.contents = contents;
        }
    }

    top_level.sort_by(|a, b| {
        match (a.is_container(), b.is_container()) {
            (false, true) => std::cmp::Ordering::Less,
            (true, false) => std::cmp::Ordering::Greater,
            // Containers go purely alphabetical at the end
            (true, true) => a.name.cmp(&b.name),
            (false, false) => b
                .favorite
                .cmp(&a.favorite)
                .then_with(|| b.equipped.cmp(&a.equipped))
                .then_with(|| a.name.cmp(&b.name)),
        }
    });
    top_level
}

fn inventory_row(item: &HostDocument, type_name: &str) -> InventoryItem {
    let kind: ItemKind = type_name.parse().unwrap_or(ItemKind::Unknown);
    InventoryItem {
        id: item
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| item.name().to_string()),
        name: item.name().to_string(),
        kind,
        quantity: item
            .system_at("quantity")
            .and_then(coerce_i64)
            .unwrap_or(1)
            .max(0) as u32,
        weight: item
            .system_at("weight")
            .and_then(coerce_f64)
            .unwrap_or(0.0),
        equipped: item
            .system_at("equipped")
            .and_then(coerce_bool)
            .unwrap_or(false),
        favorite: is_favorite(item),
        uses: limited_uses(item.system_at("uses")),
        contents: Vec::new(),
    }
}

fn container_ref(item: &HostDocument) -> Option<String> {
    match item.system_at("container") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Object(_)) => item
            .system_at("container.id")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
