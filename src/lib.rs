pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

pub use crate::app::feed::{compose_feed, Viewer};
pub use crate::app::search::filter_and_rank;
pub use crate::app::shopping::build_shopping_list;

use anyhow::Result;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::info;

use crate::app::auth::AuthStore;
use crate::app::engagement::{EngagementSeed, EngagementStore};
use crate::app::pantry::PantryStore;
use crate::app::posts::PostCollection;
use crate::app::settings::SettingsStore;
use crate::config::servings::ServingsRange;
use crate::config::{AppConfig, StorageBackend};
use crate::infra::cache::RedisKv;
use crate::infra::kv::{FileKv, KeyValueStore, MemoryKv};

pub const AUTH_KEY: &str = "user";
pub const SETTINGS_KEY: &str = "settings";
pub const PANTRY_KEY: &str = "pantry";
pub const REACTIONS_KEY: &str = "reactions";
pub const COMMENTS_KEY: &str = "comments";

/// One application session. Built once, loaded before first use, and
/// flushed on the way out.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostCollection,
    pub pantry: PantryStore,
    pub engagement: EngagementStore,
    pub settings: SettingsStore,
    pub auth: AuthStore,
    pub servings: ServingsRange,
}

impl AppState {
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let kv: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => Arc::new(FileKv::open(&config.data_dir).await?),
            StorageBackend::Memory => Arc::new(MemoryKv::new()),
            StorageBackend::Redis => Arc::new(RedisKv::connect(&config.redis_url).await?),
        };
        Ok(Self::with_kv(kv, config).await)
    }

    pub async fn with_kv(kv: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        let now = OffsetDateTime::now_utc();
        let (posts, seed) = if config.seed_demo {
            (PostCollection::with_demo_posts(now), EngagementSeed::demo(now))
        } else {
            (PostCollection::default(), EngagementSeed::empty())
        };

        let (pantry, engagement, settings, auth) = tokio::join!(
            PantryStore::load(kv.clone(), config.key(PANTRY_KEY)),
            EngagementStore::load(
                kv.clone(),
                config.key(REACTIONS_KEY),
                config.key(COMMENTS_KEY),
                seed,
            ),
            SettingsStore::load(kv.clone(), config.key(SETTINGS_KEY)),
            AuthStore::load(kv, config.key(AUTH_KEY)),
        );

        info!(
            storage = ?config.storage,
            posts = posts.len(),
            signed_in = auth.is_signed_in(),
            "session opened"
        );

        Self {
            posts,
            pantry,
            engagement,
            settings,
            auth,
            servings: config.servings,
        }
    }

    /// Waits for every pending write across all stores.
    pub async fn flush(&self) {
        tokio::join!(
            self.pantry.flush(),
            self.engagement.flush(),
            self.settings.flush(),
            self.auth.flush(),
        );
    }
}
