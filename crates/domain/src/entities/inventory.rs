//! Inventory items with one level of container nesting
//!
//! An item is either top-level or in exactly one container; containers
//! cannot nest inside other containers in this model.

use serde::{Deserialize, Serialize};

use super::LimitedUses;

/// Classification of an inventory item by its host type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Container,
    Loot,
    /// Unknown type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(ItemKind::Weapon),
            "equipment" => Ok(ItemKind::Equipment),
            "consumable" => Ok(ItemKind::Consumable),
            "tool" => Ok(ItemKind::Tool),
            "container" | "backpack" => Ok(ItemKind::Container),
            "loot" => Ok(ItemKind::Loot),
            _ => Ok(ItemKind::Unknown),
        }
    }
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Equipment => "Equipment",
            ItemKind::Consumable => "Consumable",
            ItemKind::Tool => "Tool",
            ItemKind::Container => "Container",
            ItemKind::Loot => "Loot",
            ItemKind::Unknown => "Item",
        }
    }
}

/// One inventory row, possibly a container holding nested rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Host item id, used to resolve container references
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u32,
    pub weight: f64,
    pub equipped: bool,
    pub favorite: bool,
    pub uses: Option<LimitedUses>,
    /// Items nested one level inside this container (empty for non-containers)
    pub contents: Vec<InventoryItem>,
}

impl InventoryItem {
    pub fn is_container(&self) -> bool {
        self.kind == ItemKind::Container
    }

    /// Total weight including one level of container contents.
    pub fn total_weight(&self) -> f64 {
        let own = self.weight * self.quantity as f64;
        own + self
            .contents
            .iter()
            .map(|i| i.weight * i.quantity as f64)
            .sum::<f64>()
    }
}
