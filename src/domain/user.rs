use serde::{Deserialize, Serialize};

use crate::domain::post::DietTag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub cooking_level: CookingLevel,
    #[serde(default)]
    pub dietary_preferences: Vec<DietTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_uri: Option<String>,
    /// Space ids to surface first on the home feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_spaces: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookingLevel {
    Beginner,
    #[serde(rename = "Home Cook")]
    HomeCook,
    Advanced,
}

/// Persisted auth record. `password` holds an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuthData {
    pub user: UserProfile,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPayload {
    pub email: String,
    pub password: String,
    pub username: String,
    pub display_name: String,
    pub cooking_level: CookingLevel,
    #[serde(default)]
    pub dietary_preferences: Vec<DietTag>,
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub cooking_level: Option<CookingLevel>,
    pub dietary_preferences: Option<Vec<DietTag>>,
    pub profile_photo_uri: Option<String>,
    pub preferred_spaces: Option<Vec<String>>,
}
