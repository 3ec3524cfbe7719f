use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePost {
    pub post_id: String,
    pub author: PostAuthor,
    pub media_type: MediaType,
    /// First locator is the primary one.
    pub media_uris: Vec<String>,
    pub recipe: RecipeCard,
    /// One or two cooking space ids.
    pub cooking_spaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<String>,
    #[serde(default)]
    pub is_experiment: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl RecipePost {
    pub fn is_remix(&self) -> bool {
        self.parent_post_id.is_some()
    }

    pub fn in_space(&self, space_id: &str) -> bool {
        self.cooking_spaces.iter().any(|space| space == space_id)
    }

    /// Diet tags with an absent list treated as empty.
    pub fn diet_tags(&self) -> &[DietTag] {
        self.recipe.diet_tags.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub id: String,
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    pub dish_name: String,
    pub ingredients: Vec<IngredientItem>,
    pub steps: Vec<RecipeStep>,
    pub estimated_cook_time_minutes: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_tags: Option<Vec<DietTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub id: String,
    pub name: String,
    /// Free-form, e.g. "2", "1/2", "pinch".
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    pub order: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_seconds: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Photo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietTag {
    Vegetarian,
    Vegan,
    Halal,
    Keto,
    None,
}

impl DietTag {
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Vegetarian" => Some(Self::Vegetarian),
            "Vegan" => Some(Self::Vegan),
            "Halal" => Some(Self::Halal),
            "Keto" => Some(Self::Keto),
            "None" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Halal => "Halal",
            Self::Keto => "Keto",
            Self::None => "None",
        }
    }
}
