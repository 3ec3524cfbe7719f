#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cookpot::config::AppConfig;
use cookpot::domain::post::{
    DietTag, Difficulty, IngredientItem, MediaType, PostAuthor, RecipeCard, RecipePost, RecipeStep,
};
use cookpot::domain::user::{CookingLevel, SignUpPayload};
use cookpot::infra::kv::{KeyValueStore, MemoryKv};
use cookpot::AppState;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Installs a subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

// ---------------------------------------------------------------------------
// Key-value doubles
// ---------------------------------------------------------------------------

/// In-memory store whose reads and writes can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyKv {
    pub inner: MemoryKv,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FlakyKv {
    pub fn new(inner: MemoryKv) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Successful writes and removals so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FlakyKv {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated read failure for {}", key));
        }
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated write failure for {}", key));
        }
        self.inner.set_item(key, value).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated remove failure for {}", key));
        }
        self.inner.remove_item(key).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn shared(kv: impl KeyValueStore + 'static) -> Arc<dyn KeyValueStore> {
    Arc::new(kv)
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn test_config() -> AppConfig {
    AppConfig {
        key_prefix: "test".to_string(),
        ..AppConfig::default()
    }
}

/// Session over `kv` with the bundled demo content.
pub async fn session(kv: MemoryKv) -> AppState {
    init_tracing();
    AppState::with_kv(shared(kv), &test_config()).await
}

pub fn signup_payload() -> SignUpPayload {
    SignUpPayload {
        email: "  Cook@Example.com ".to_string(),
        password: "secret123".to_string(),
        username: " homecook ".to_string(),
        display_name: "Home Cook".to_string(),
        cooking_level: CookingLevel::HomeCook,
        dietary_preferences: vec![DietTag::Vegetarian],
    }
}

// ---------------------------------------------------------------------------
// Post fixtures
// ---------------------------------------------------------------------------

pub fn base_time() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

pub fn minutes_after_base(minutes: i64) -> OffsetDateTime {
    base_time() + Duration::minutes(minutes)
}

pub fn ingredient(id: &str, name: &str, quantity: &str, unit: Option<&str>) -> IngredientItem {
    IngredientItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity: quantity.to_string(),
        unit: unit.map(str::to_string),
    }
}

/// A plain Easy 20-minute recipe in the "italian" space with no diet tags or
/// cuisine, created `minutes` after the base time.
pub fn post(id: &str, minutes: i64) -> RecipePost {
    RecipePost {
        post_id: id.to_string(),
        author: PostAuthor {
            id: "author-1".to_string(),
            username: "author".to_string(),
            display_name: "Author".to_string(),
        },
        media_type: MediaType::Photo,
        media_uris: vec![format!("https://media.example/{}.jpg", id)],
        recipe: RecipeCard {
            dish_name: format!("Dish {}", id),
            ingredients: vec![
                ingredient("i1", "Olive oil", "2", Some("tbsp")),
                ingredient("i2", "Garlic", "3", Some("cloves")),
            ],
            steps: vec![RecipeStep {
                id: "s1".to_string(),
                order: 1,
                text: "Cook it.".to_string(),
                timestamp_seconds: None,
            }],
            estimated_cook_time_minutes: 20,
            difficulty: Difficulty::Easy,
            diet_tags: None,
            cuisine: None,
        },
        cooking_spaces: vec!["italian".to_string()],
        parent_post_id: None,
        is_experiment: false,
        created_at: minutes_after_base(minutes),
    }
}

pub fn with_ingredients(mut post: RecipePost, names: &[&str]) -> RecipePost {
    post.recipe.ingredients = names
        .iter()
        .enumerate()
        .map(|(index, name)| ingredient(&format!("i{}", index + 1), name, "1", None))
        .collect();
    post
}

pub fn with_spaces(mut post: RecipePost, spaces: &[&str]) -> RecipePost {
    post.cooking_spaces = spaces.iter().map(|space| space.to_string()).collect();
    post
}

pub fn with_diet_tags(mut post: RecipePost, tags: &[DietTag]) -> RecipePost {
    post.recipe.diet_tags = Some(tags.to_vec());
    post
}

pub fn ids(posts: &[RecipePost]) -> Vec<&str> {
    posts.iter().map(|post| post.post_id.as_str()).collect()
}
