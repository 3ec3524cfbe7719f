use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::domain::post::{
    DietTag, Difficulty, IngredientItem, MediaType, PostAuthor, RecipeCard, RecipePost, RecipeStep,
};
use crate::domain::space::space_by_id;
use crate::domain::user::UserProfile;
use crate::error::{AppError, AppResult};

const DEFAULT_REMIX_COOK_MINUTES: u32 = 30;

/// Posts visible this session: the user's own (newest first) followed by
/// the bundled ones. Posts are immutable once added.
#[derive(Clone, Default)]
pub struct PostCollection {
    session: Arc<RwLock<Vec<RecipePost>>>,
    bundled: Arc<Vec<RecipePost>>,
}

impl PostCollection {
    pub fn new(bundled: Vec<RecipePost>) -> Self {
        Self {
            session: Arc::default(),
            bundled: Arc::new(bundled),
        }
    }

    pub fn with_demo_posts(now: OffsetDateTime) -> Self {
        Self::new(demo_posts(now))
    }

    pub fn all(&self) -> Vec<RecipePost> {
        let session = self
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        session.iter().chain(self.bundled.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        let session = self
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        session.len() + self.bundled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, post_id: &str) -> Option<RecipePost> {
        let session = self
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        session
            .iter()
            .chain(self.bundled.iter())
            .find(|post| post.post_id == post_id)
            .cloned()
    }

    /// The post this one remixes, if it is a remix and the parent still
    /// exists.
    pub fn parent_of(&self, post: &RecipePost) -> Option<RecipePost> {
        post.parent_post_id
            .as_deref()
            .and_then(|parent_id| self.get(parent_id))
    }

    pub fn add_post(&self, post: RecipePost) -> AppResult<RecipePost> {
        validate_post(&post)?;

        let mut session = self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let exists = |post_id: &str| {
            session
                .iter()
                .chain(self.bundled.iter())
                .any(|existing| existing.post_id == post_id)
        };
        if exists(&post.post_id) {
            return Err(AppError::invalid(format!(
                "post {} already exists",
                post.post_id
            )));
        }
        if let Some(parent_id) = post.parent_post_id.as_deref() {
            if !exists(parent_id) {
                return Err(AppError::not_found("parent post not found"));
            }
        }

        session.insert(0, post.clone());
        info!(post_id = %post.post_id, remix = post.is_remix(), "post added");
        Ok(post)
    }

    pub fn publish_remix(
        &self,
        parent_post_id: &str,
        author: &UserProfile,
        draft: RemixDraft,
    ) -> AppResult<RecipePost> {
        let parent = self
            .get(parent_post_id)
            .ok_or_else(|| AppError::not_found("recipe not found"))?;
        let remix = build_remix(&parent, author, draft, OffsetDateTime::now_utc());
        self.add_post(remix)
    }
}

/// What the user changes when remixing. Everything else comes from the parent.
#[derive(Debug, Clone)]
pub struct RemixDraft {
    pub dish_name: Option<String>,
    pub cook_time_minutes: Option<u32>,
    pub difficulty: Option<Difficulty>,
    /// Keep every parent media locator, or only the primary one.
    pub reuse_media: bool,
}

impl Default for RemixDraft {
    fn default() -> Self {
        Self {
            dish_name: None,
            cook_time_minutes: None,
            difficulty: None,
            reuse_media: true,
        }
    }
}

pub fn build_remix(
    parent: &RecipePost,
    author: &UserProfile,
    draft: RemixDraft,
    now: OffsetDateTime,
) -> RecipePost {
    let suffix = Uuid::new_v4().simple().to_string();

    let dish_name = draft
        .dish_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{} (remix)", parent.recipe.dish_name));

    let estimated_cook_time_minutes = draft
        .cook_time_minutes
        .filter(|minutes| *minutes >= 1)
        .unwrap_or(DEFAULT_REMIX_COOK_MINUTES);

    let media_uris = if draft.reuse_media {
        parent.media_uris.clone()
    } else {
        parent.media_uris.iter().take(1).cloned().collect()
    };

    RecipePost {
        post_id: format!("remix-{}", suffix),
        author: PostAuthor {
            id: author.id.clone(),
            username: author.username.clone(),
            display_name: author.display_name.clone(),
        },
        media_type: parent.media_type,
        media_uris,
        recipe: RecipeCard {
            dish_name,
            ingredients: parent
                .recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientItem {
                    id: format!("{}-{}", ingredient.id, suffix),
                    ..ingredient.clone()
                })
                .collect(),
            steps: parent
                .recipe
                .steps
                .iter()
                .map(|step| RecipeStep {
                    id: format!("{}-{}", step.id, suffix),
                    ..step.clone()
                })
                .collect(),
            estimated_cook_time_minutes,
            difficulty: draft.difficulty.unwrap_or(parent.recipe.difficulty),
            diet_tags: parent.recipe.diet_tags.clone(),
            cuisine: parent.recipe.cuisine.clone(),
        },
        cooking_spaces: parent.cooking_spaces.clone(),
        parent_post_id: Some(parent.post_id.clone()),
        is_experiment: false,
        created_at: now,
    }
}

/// Structural checks on a single post. Every failure here is
/// `AppError::Validation`; a missing remix parent is reported by `add_post`
/// as `AppError::NotFound`.
pub fn validate_post(post: &RecipePost) -> AppResult<()> {
    if post.post_id.trim().is_empty() {
        return Err(AppError::invalid("post id cannot be empty"));
    }
    if post.recipe.dish_name.trim().is_empty() {
        return Err(AppError::invalid("dish name cannot be empty"));
    }
    if post.media_uris.is_empty() {
        return Err(AppError::invalid("a post needs at least one photo or video"));
    }
    if !(1..=2).contains(&post.cooking_spaces.len()) {
        return Err(AppError::invalid("a recipe belongs to one or two cooking spaces"));
    }
    let mut seen = HashSet::new();
    for space_id in &post.cooking_spaces {
        if space_by_id(space_id).is_none() {
            return Err(AppError::invalid(format!("unknown cooking space: {}", space_id)));
        }
        if !seen.insert(space_id.as_str()) {
            return Err(AppError::invalid("cooking spaces must be distinct"));
        }
    }
    Ok(())
}

/// Distinct diet tags across `posts`, in first-seen order.
pub fn available_diet_tags(posts: &[RecipePost]) -> Vec<DietTag> {
    let mut tags = Vec::new();
    for tag in posts.iter().flat_map(|post| post.diet_tags()) {
        if !tags.contains(tag) {
            tags.push(*tag);
        }
    }
    tags
}

/// The three bundled recipes, an hour apart with the newest at `now`.
pub fn demo_posts(now: OffsetDateTime) -> Vec<RecipePost> {
    vec![
        RecipePost {
            post_id: "1".to_string(),
            author: author("demo-1", "pastanight", "Pasta Night"),
            media_type: MediaType::Video,
            media_uris: vec!["https://d23dyxeqlo5psv.cloudfront.net/big_buck_bunny.mp4".to_string()],
            recipe: RecipeCard {
                dish_name: "Simple Pasta Aglio e Olio".to_string(),
                ingredients: vec![
                    ingredient("i1", "Spaghetti", "200", Some("g")),
                    ingredient("i2", "Garlic", "3", Some("cloves")),
                    ingredient("i3", "Olive oil", "3", Some("tbsp")),
                    ingredient("i4", "Chili flakes", "1", Some("tsp")),
                    ingredient("i5", "Parsley", "2", Some("tbsp")),
                    ingredient("i6", "Salt", "", None),
                ],
                steps: vec![
                    step("s1", 1, "Boil salted water and cook spaghetti until al dente.", Some(5)),
                    step("s2", 2, "Gently cook garlic and chili in olive oil.", Some(25)),
                    step("s3", 3, "Toss pasta with the garlic oil and parsley.", Some(45)),
                ],
                estimated_cook_time_minutes: 20,
                difficulty: Difficulty::Easy,
                diet_tags: Some(vec![DietTag::Vegetarian]),
                cuisine: Some("Italian".to_string()),
            },
            cooking_spaces: vec!["italian".to_string(), "30-min-dinners".to_string()],
            parent_post_id: None,
            is_experiment: false,
            created_at: now,
        },
        RecipePost {
            post_id: "2".to_string(),
            author: author("demo-2", "sheetpan", "Sheet Pan Suppers"),
            media_type: MediaType::Photo,
            media_uris: vec![
                "https://images.pexels.com/photos/1437267/pexels-photo-1437267.jpeg".to_string(),
            ],
            recipe: RecipeCard {
                dish_name: "Roasted Vegetables with Herbs".to_string(),
                ingredients: vec![
                    ingredient("i1", "Carrots", "3", Some("")),
                    ingredient("i2", "Potatoes", "4", Some("")),
                    ingredient("i3", "Olive oil", "3", Some("tbsp")),
                    ingredient("i4", "Rosemary", "1", Some("tbsp")),
                    ingredient("i5", "Salt", "", None),
                ],
                steps: vec![
                    step("s1", 1, "Chop vegetables into even pieces.", None),
                    step("s2", 2, "Toss with oil, herbs, and salt.", None),
                    step("s3", 3, "Roast until golden and tender.", None),
                ],
                estimated_cook_time_minutes: 40,
                difficulty: Difficulty::Medium,
                diet_tags: Some(vec![DietTag::Vegetarian, DietTag::Vegan]),
                cuisine: Some("European".to_string()),
            },
            cooking_spaces: vec!["plant-forward".to_string(), "comfort-food".to_string()],
            parent_post_id: None,
            is_experiment: true,
            created_at: now - Duration::hours(1),
        },
        RecipePost {
            post_id: "3".to_string(),
            author: author("demo-3", "weeknightonepot", "Weeknight One Pot"),
            media_type: MediaType::Photo,
            media_uris: vec![
                "https://images.pexels.com/photos/1640770/pexels-photo-1640770.jpeg".to_string(),
            ],
            recipe: RecipeCard {
                dish_name: "One-Pot Chickpea Stew".to_string(),
                ingredients: vec![
                    ingredient("i1", "Chickpeas", "1", Some("can")),
                    ingredient("i2", "Tomatoes", "1", Some("can")),
                    ingredient("i3", "Onion", "1", Some("")),
                    ingredient("i4", "Garlic", "2", Some("cloves")),
                ],
                steps: vec![
                    step("s1", 1, "Sauté onion and garlic.", None),
                    step("s2", 2, "Add tomatoes and chickpeas.", None),
                    step("s3", 3, "Simmer until thickened.", None),
                ],
                estimated_cook_time_minutes: 30,
                difficulty: Difficulty::Easy,
                diet_tags: Some(vec![DietTag::Vegetarian, DietTag::Vegan, DietTag::Halal]),
                cuisine: Some("Middle Eastern–inspired".to_string()),
            },
            cooking_spaces: vec!["30-min-dinners".to_string(), "student-meals".to_string()],
            parent_post_id: None,
            is_experiment: false,
            created_at: now - Duration::hours(2),
        },
    ]
}

fn author(id: &str, username: &str, display_name: &str) -> PostAuthor {
    PostAuthor {
        id: id.to_string(),
        username: username.to_string(),
        display_name: display_name.to_string(),
    }
}

fn ingredient(id: &str, name: &str, quantity: &str, unit: Option<&str>) -> IngredientItem {
    IngredientItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity: quantity.to_string(),
        unit: unit.map(str::to_string),
    }
}

fn step(id: &str, order: u32, text: &str, timestamp_seconds: Option<u32>) -> RecipeStep {
    RecipeStep {
        id: id.to_string(),
        order,
        text: text.to_string(),
        timestamp_seconds,
    }
}
