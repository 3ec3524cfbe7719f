use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Cooking-focused reactions. There are no likes and no counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Flavor,
    Presentation,
    Creativity,
    Practicality,
}

impl ReactionType {
    /// Canonical display order.
    pub const ALL: [ReactionType; 4] = [
        Self::Flavor,
        Self::Presentation,
        Self::Creativity,
        Self::Practicality,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Flavor => "🔥",
            Self::Presentation => "🤌",
            Self::Creativity => "🧠",
            Self::Practicality => "🕒",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Flavor => "Flavor",
            Self::Presentation => "Presentation",
            Self::Creativity => "Creativity",
            Self::Practicality => "Practicality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub author_display_name: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
