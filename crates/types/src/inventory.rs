use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Where an inventory item is stored.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    #[default]
    Fridge,
    Freezer,
    Pantry,
}

/// Expiry state of an inventory item, as reported by the inventory
/// collaborator.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    #[default]
    Fresh,
    ExpiringSoon,
    Expired,
}

/// One pantry/fridge item from the inventory summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub location: StorageLocation,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub expiry_status: ExpiryStatus,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
}

/// Pantry-derived ingredient list supplied by the inventory collaborator,
/// one possible input to recipe matching.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl InventorySummary {
    /// Item names usable as match queries. Expired items are excluded;
    /// items expiring soon are kept (using them up is the point).
    pub fn available_ingredient_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.expiry_status != ExpiryStatus::Expired)
            .map(|item| item.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, status: ExpiryStatus) -> InventoryItem {
        InventoryItem {
            name: name.to_string(),
            expiry_status: status,
            ..InventoryItem::default()
        }
    }

    #[test]
    fn test_expired_items_excluded_from_match_input() {
        let summary = InventorySummary {
            items: vec![
                item("chicken breast", ExpiryStatus::Fresh),
                item("milk", ExpiryStatus::ExpiringSoon),
                item("spinach", ExpiryStatus::Expired),
            ],
        };
        assert_eq!(
            summary.available_ingredient_names(),
            vec!["chicken breast".to_string(), "milk".to_string()]
        );
    }

    #[test]
    fn test_expiry_status_snake_case_round_trip() {
        let json = serde_json::to_string(&ExpiryStatus::ExpiringSoon).unwrap();
        assert_eq!(json, "\"expiring_soon\"");
        let back: ExpiryStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExpiryStatus::ExpiringSoon);
    }
}
