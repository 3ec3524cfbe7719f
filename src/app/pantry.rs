use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::app::matcher::{matches_filters, FilterSpec};
use crate::domain::pantry::PantryEntry;
use crate::domain::post::RecipePost;
use crate::infra::kv::KeyValueStore;
use crate::infra::store::PersistentStore;

/// Saved and cooked recipes, newest first, at most one entry per post.
///
/// Entry lifecycle: absent -> saved -> (cooked <-> saved) -> absent.
#[derive(Clone)]
pub struct PantryStore {
    store: PersistentStore<Vec<PantryEntry>>,
}

impl PantryStore {
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store: PersistentStore::load(kv, key, Vec::new()).await,
        }
    }

    pub fn store(&self) -> &PersistentStore<Vec<PantryEntry>> {
        &self.store
    }

    pub fn entries(&self) -> Vec<PantryEntry> {
        self.store.get()
    }

    pub fn entry(&self, post_id: &str) -> Option<PantryEntry> {
        self.store
            .read(|entries| entries.iter().find(|entry| entry.post_id == post_id).cloned())
    }

    pub fn is_saved(&self, post_id: &str) -> bool {
        self.store
            .read(|entries| entries.iter().any(|entry| entry.post_id == post_id))
    }

    pub fn is_cooked(&self, post_id: &str) -> bool {
        self.store.read(|entries| {
            entries
                .iter()
                .any(|entry| entry.post_id == post_id && entry.is_cooked())
        })
    }

    /// Saves the post, or removes its entry (cooked or not) if already saved.
    /// Returns whether the post is saved afterwards.
    pub fn toggle_save(&self, post_id: &str) -> bool {
        self.store.mutate(|entries| {
            if let Some(index) = entries.iter().position(|entry| entry.post_id == post_id) {
                entries.remove(index);
                false
            } else {
                entries.insert(0, new_entry(post_id, OffsetDateTime::now_utc(), None));
                true
            }
        })
    }

    /// Sets `cooked_at` to now, saving the post first if it isn't saved.
    pub fn mark_cooked(&self, post_id: &str) -> PantryEntry {
        let now = OffsetDateTime::now_utc();
        self.store.mutate(|entries| {
            match entries.iter().position(|entry| entry.post_id == post_id) {
                Some(index) => {
                    entries[index].cooked_at = Some(now);
                    entries[index].clone()
                }
                None => {
                    let entry = new_entry(post_id, now, Some(now));
                    entries.insert(0, entry.clone());
                    entry
                }
            }
        })
    }

    /// Clears `cooked_at`; the entry stays saved. No-op for unsaved posts.
    pub fn unmark_cooked(&self, post_id: &str) -> Option<PantryEntry> {
        if !self.is_cooked(post_id) {
            return self.entry(post_id);
        }
        self.store.mutate(|entries| {
            entries
                .iter_mut()
                .find(|entry| entry.post_id == post_id)
                .map(|entry| {
                    entry.cooked_at = None;
                    entry.clone()
                })
        })
    }

    /// Returns whether an entry was removed.
    pub fn remove(&self, post_id: &str) -> bool {
        if !self.is_saved(post_id) {
            return false;
        }
        self.store.mutate(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.post_id != post_id);
            entries.len() != before
        })
    }

    /// Pairs each entry with its post. Entries whose post is gone are skipped.
    pub fn saved_posts(&self, posts: &[RecipePost]) -> Vec<(PantryEntry, RecipePost)> {
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                posts
                    .iter()
                    .find(|post| post.post_id == entry.post_id)
                    .map(|post| (entry, post.clone()))
            })
            .collect()
    }

    /// Saved posts narrowed by the discovery criteria, pantry order kept.
    /// Ingredient terms are ignored here.
    pub fn saved_posts_matching(
        &self,
        posts: &[RecipePost],
        spec: &FilterSpec,
    ) -> Vec<(PantryEntry, RecipePost)> {
        self.saved_posts(posts)
            .into_iter()
            .filter(|(_, post)| matches_filters(post, spec))
            .collect()
    }

    pub async fn flush(&self) {
        self.store.flush().await;
    }
}

fn new_entry(
    post_id: &str,
    added_at: OffsetDateTime,
    cooked_at: Option<OffsetDateTime>,
) -> PantryEntry {
    PantryEntry {
        id: format!("{}-{}", post_id, Uuid::new_v4()),
        post_id: post_id.to_string(),
        added_at,
        cooked_at,
    }
}
