use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryEntry {
    pub id: String,
    pub post_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooked_at: Option<OffsetDateTime>,
}

impl PantryEntry {
    pub fn is_cooked(&self) -> bool {
        self.cooked_at.is_some()
    }
}

/// Derived and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub post_id: String,
    pub servings: u32,
    pub base_servings: u32,
    pub items: Vec<ShoppingListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub ingredient_name: String,
    pub quantity_display: String,
}
