use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use ulid::Ulid;

use crate::domain::engagement::{Comment, ReactionType};
use crate::error::{AppError, AppResult};
use crate::infra::kv::KeyValueStore;
use crate::infra::store::PersistentStore;

const MAX_COMMENT_LEN: usize = 1000;

pub type ReactionMap = BTreeMap<String, Vec<ReactionType>>;
pub type CommentMap = BTreeMap<String, Vec<Comment>>;

/// Read-only engagement shown alongside the user's own.
#[derive(Debug, Clone, Default)]
pub struct EngagementSeed {
    pub reactions: HashMap<String, Vec<ReactionType>>,
    pub comments: HashMap<String, Vec<Comment>>,
}

impl EngagementSeed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Demo reactions and comments for the bundled posts "1", "2" and "3".
    pub fn demo(now: OffsetDateTime) -> Self {
        let reactions = HashMap::from([
            (
                "1".to_string(),
                vec![ReactionType::Flavor, ReactionType::Practicality],
            ),
            (
                "2".to_string(),
                vec![ReactionType::Presentation, ReactionType::Creativity],
            ),
            ("3".to_string(), vec![ReactionType::Flavor]),
        ]);

        let comments = HashMap::from([
            (
                "1".to_string(),
                vec![Comment {
                    id: "mc1".to_string(),
                    post_id: "1".to_string(),
                    user_id: "demo-1".to_string(),
                    author_display_name: "Pasta Night".to_string(),
                    text: "Works great with whole wheat spaghetti too.".to_string(),
                    created_at: now - Duration::days(1),
                }],
            ),
            (
                "2".to_string(),
                vec![Comment {
                    id: "mc2".to_string(),
                    post_id: "2".to_string(),
                    user_id: "demo-2".to_string(),
                    author_display_name: "Sheet Pan Suppers".to_string(),
                    text: "I add a pinch of smoked paprika.".to_string(),
                    created_at: now - Duration::days(2),
                }],
            ),
        ]);

        Self {
            reactions,
            comments,
        }
    }
}

/// Set union of both layers, in canonical reaction order.
pub fn merge_reactions(mine: &[ReactionType], seed: &[ReactionType]) -> Vec<ReactionType> {
    ReactionType::ALL
        .into_iter()
        .filter(|reaction| mine.contains(reaction) || seed.contains(reaction))
        .collect()
}

/// Both layers, newest first. Equal timestamps keep the user's comments
/// ahead of seeded ones.
pub fn merge_comments(mine: &[Comment], seed: &[Comment]) -> Vec<Comment> {
    let mut merged: Vec<Comment> = mine.iter().chain(seed.iter()).cloned().collect();
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}

/// True when every non-whitespace character falls in the emoji ranges,
/// including joiners, variation selectors and skin-tone modifiers.
pub fn is_emoji_only(text: &str) -> bool {
    let mut any = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            continue;
        }
        if !is_emoji_char(ch) {
            return false;
        }
        any = true;
    }
    any
}

fn is_emoji_char(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1F000..=0x1FAFF   // pictographs, emoticons, transport, symbols, flags
            | 0x2600..=0x27BF // misc symbols and dingbats
            | 0x2B00..=0x2BFF // arrows, stars
            | 0x2190..=0x21FF // arrows
            | 0x2300..=0x23FF // misc technical (watch, hourglass)
            | 0x25AA..=0x25FE // geometric shapes (play, stop, squares)
            | 0x2934..=0x2935 // curved arrows
            | 0x00A9 | 0x00AE | 0x203C | 0x2049 | 0x2122 | 0x2139 | 0x24C2
            | 0x3030 | 0x303D | 0x3297 | 0x3299
            | 0x200D          // zero width joiner
            | 0x20E3          // keycap
            | 0xFE00..=0xFE0F // variation selectors
            | 0xE0020..=0xE007F // tag sequences
    )
}

/// The user's reactions and comments, overlaid on a read-only seed.
#[derive(Clone)]
pub struct EngagementStore {
    reactions: PersistentStore<ReactionMap>,
    comments: PersistentStore<CommentMap>,
    seed: Arc<EngagementSeed>,
}

impl EngagementStore {
    pub async fn load(
        kv: Arc<dyn KeyValueStore>,
        reactions_key: impl Into<String>,
        comments_key: impl Into<String>,
        seed: EngagementSeed,
    ) -> Self {
        let (reactions, comments) = tokio::join!(
            PersistentStore::load(kv.clone(), reactions_key, ReactionMap::new()),
            PersistentStore::load(kv, comments_key, CommentMap::new()),
        );
        Self {
            reactions,
            comments,
            seed: Arc::new(seed),
        }
    }

    pub fn reactions_store(&self) -> &PersistentStore<ReactionMap> {
        &self.reactions
    }

    pub fn comments_store(&self) -> &PersistentStore<CommentMap> {
        &self.comments
    }

    /// Reactions present on the post from anyone. Never a count.
    pub fn reactions_for_post(&self, post_id: &str) -> Vec<ReactionType> {
        let seed = self
            .seed
            .reactions
            .get(post_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.reactions.read(|map| {
            let mine = map.get(post_id).map(Vec::as_slice).unwrap_or(&[]);
            merge_reactions(mine, seed)
        })
    }

    pub fn my_reactions_for_post(&self, post_id: &str) -> Vec<ReactionType> {
        self.reactions
            .read(|map| map.get(post_id).cloned().unwrap_or_default())
    }

    /// Adds the reaction if absent, removes it if present. Returns whether
    /// it is active afterwards.
    pub fn toggle_reaction(&self, post_id: &str, reaction: ReactionType) -> bool {
        self.reactions.mutate(|map| {
            let mine = map.entry(post_id.to_string()).or_default();
            let active = if let Some(index) = mine.iter().position(|r| *r == reaction) {
                mine.remove(index);
                false
            } else {
                mine.push(reaction);
                true
            };
            if mine.is_empty() {
                map.remove(post_id);
            }
            active
        })
    }

    pub fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        let seed = self
            .seed
            .comments
            .get(post_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.comments.read(|map| {
            let mine = map.get(post_id).map(Vec::as_slice).unwrap_or(&[]);
            merge_comments(mine, seed)
        })
    }

    /// Appends a comment ahead of the post's earlier ones. Text must contain
    /// something besides whitespace and emoji.
    pub fn add_comment(
        &self,
        post_id: &str,
        text: &str,
        author_display_name: &str,
        user_id: &str,
    ) -> AppResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::invalid("comment cannot be empty"));
        }
        if is_emoji_only(text) {
            return Err(AppError::invalid("comment needs more than emoji"));
        }
        if text.chars().count() > MAX_COMMENT_LEN {
            return Err(AppError::invalid(format!(
                "comment exceeds {} characters",
                MAX_COMMENT_LEN
            )));
        }

        let comment = Comment {
            id: format!("comment-{}", Ulid::new()),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            author_display_name: author_display_name.to_string(),
            text: text.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        self.comments.mutate(|map| {
            map.entry(post_id.to_string())
                .or_default()
                .insert(0, comment.clone());
        });
        Ok(comment)
    }

    pub async fn flush(&self) {
        tokio::join!(self.reactions.flush(), self.comments.flush());
    }
}
