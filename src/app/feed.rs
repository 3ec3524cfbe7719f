use crate::domain::post::{DietTag, RecipePost};
use crate::domain::user::UserProfile;

/// Personalization signals for the home feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub preferred_spaces: Vec<String>,
    pub dietary_preferences: Vec<DietTag>,
}

impl From<&UserProfile> for Viewer {
    fn from(user: &UserProfile) -> Self {
        Self {
            preferred_spaces: user.preferred_spaces.clone().unwrap_or_default(),
            // "None" is a profile choice, not a tag to match on.
            dietary_preferences: user
                .dietary_preferences
                .iter()
                .copied()
                .filter(|tag| *tag != DietTag::None)
                .collect(),
        }
    }
}

/// Home feed order: newest first, then at most one personalization pass.
/// Preferred spaces win over dietary preferences; the two are never combined.
pub fn compose_feed(posts: &[RecipePost], viewer: &Viewer) -> Vec<RecipePost> {
    let mut feed = by_recency(posts);

    if !viewer.preferred_spaces.is_empty() {
        promote(&mut feed, |post| {
            viewer
                .preferred_spaces
                .iter()
                .any(|space| post.in_space(space))
        });
    } else if !viewer.dietary_preferences.is_empty() {
        promote(&mut feed, |post| {
            post.diet_tags()
                .iter()
                .any(|tag| viewer.dietary_preferences.contains(tag))
        });
    }

    feed
}

/// Posts in one cooking space, newest first; same-instant posts list the
/// quicker recipe first.
pub fn space_feed(posts: &[RecipePost], space_id: &str) -> Vec<RecipePost> {
    let mut feed: Vec<RecipePost> = posts
        .iter()
        .filter(|post| post.in_space(space_id))
        .cloned()
        .collect();
    feed.sort_by(|a, b| {
        b.created_at.cmp(&a.created_at).then_with(|| {
            a.recipe
                .estimated_cook_time_minutes
                .cmp(&b.recipe.estimated_cook_time_minutes)
        })
    });
    feed
}

fn by_recency(posts: &[RecipePost]) -> Vec<RecipePost> {
    let mut feed = posts.to_vec();
    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed
}

// Stable: both halves keep their recency order.
fn promote(feed: &mut [RecipePost], preferred: impl Fn(&RecipePost) -> bool) {
    feed.sort_by_key(|post| !preferred(post));
}
