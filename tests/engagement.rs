//! Engagement Tests
//!
//! Reactions and comments layered over the demo seed.

mod common;

use common::{base_time, session, shared, test_config};
use cookpot::app::engagement::{
    is_emoji_only, merge_comments, merge_reactions, EngagementSeed, EngagementStore,
};
use cookpot::domain::engagement::{Comment, ReactionType};
use cookpot::error::AppError;
use cookpot::infra::kv::MemoryKv;
use time::Duration;

async fn fresh_store(kv: &MemoryKv, seed: EngagementSeed) -> EngagementStore {
    common::init_tracing();
    let config = test_config();
    EngagementStore::load(
        shared(kv.clone()),
        config.key("reactions"),
        config.key("comments"),
        seed,
    )
    .await
}

fn comment(id: &str, minutes: i64) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: "p1".to_string(),
        user_id: "u1".to_string(),
        author_display_name: "Cook".to_string(),
        text: format!("comment {}", id),
        created_at: base_time() + Duration::minutes(minutes),
    }
}

// ===========================================================================
// Comment validation
// ===========================================================================

#[test]
fn emoji_only_detection() {
    assert!(is_emoji_only("🔥🔥"));
    assert!(is_emoji_only(" 👍🏽 ❤️ "));
    assert!(is_emoji_only("👨‍🍳"));
    assert!(is_emoji_only("‼️"));
    assert!(is_emoji_only("▶️"));
    assert!(is_emoji_only("©️"));
    assert!(is_emoji_only("〽️ ⤴️ Ⓜ️ ℹ️"));
    assert!(!is_emoji_only("© 2024 family recipe"));
    assert!(!is_emoji_only("great recipe 🔥"));
    assert!(!is_emoji_only("   "));
    assert!(!is_emoji_only(""));
}

#[tokio::test]
async fn emoji_only_comment_is_rejected() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    let err = store.add_comment("p1", "🔥🔥", "Cook", "u1").unwrap_err();
    assert_eq!(err, AppError::invalid("comment needs more than emoji"));
    assert!(store.comments_for_post("p1").is_empty());
}

#[tokio::test]
async fn symbol_emoji_comment_is_rejected() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    let err = store.add_comment("p1", "‼️▶️", "Cook", "u1").unwrap_err();
    assert_eq!(err, AppError::invalid("comment needs more than emoji"));
    assert!(store.comments_for_post("p1").is_empty());
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    let err = store.add_comment("p1", "   \n ", "Cook", "u1").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.comments_for_post("p1").is_empty());
}

#[tokio::test]
async fn overlong_comment_is_rejected() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    let text = "a".repeat(1001);
    let err = store.add_comment("p1", &text, "Cook", "u1").unwrap_err();
    assert_eq!(err, AppError::invalid("comment exceeds 1000 characters"));
    assert!(store.add_comment("p1", &"a".repeat(1000), "Cook", "u1").is_ok());
}

#[tokio::test]
async fn accepted_comment_is_trimmed_and_listed_first() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    let first = store.add_comment("p1", "great recipe", "Cook", "u1").unwrap();
    let second = store
        .add_comment("p1", "  made it twice  ", "Cook", "u1")
        .unwrap();

    assert_eq!(second.text, "made it twice");
    assert_eq!(second.post_id, "p1");
    assert!(second.id.starts_with("comment-"));
    assert_ne!(first.id, second.id);

    let listed = store.comments_for_post("p1");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

// ===========================================================================
// Merging
// ===========================================================================

#[test]
fn reactions_merge_as_a_set_in_canonical_order() {
    let merged = merge_reactions(
        &[ReactionType::Practicality, ReactionType::Flavor],
        &[ReactionType::Flavor, ReactionType::Creativity],
    );
    assert_eq!(
        merged,
        vec![
            ReactionType::Flavor,
            ReactionType::Creativity,
            ReactionType::Practicality,
        ]
    );
}

#[test]
fn comments_merge_newest_first() {
    let mine = vec![comment("mine-new", 30), comment("mine-old", 0)];
    let seed = vec![comment("seed", 10)];

    let merged = merge_comments(&mine, &seed);
    let order: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["mine-new", "seed", "mine-old"]);
}

#[test]
fn equal_timestamps_put_the_users_comment_first() {
    let merged = merge_comments(&[comment("mine", 5)], &[comment("seed", 5)]);
    assert_eq!(merged[0].id, "mine");
}

// ===========================================================================
// Reactions
// ===========================================================================

#[test]
fn reaction_types_have_display_metadata() {
    let labels: Vec<&str> = ReactionType::ALL.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Flavor", "Presentation", "Creativity", "Practicality"]);
    assert_eq!(ReactionType::Flavor.emoji(), "🔥");
    assert!(ReactionType::ALL
        .iter()
        .all(|reaction| is_emoji_only(reaction.emoji())));
}

#[tokio::test]
async fn toggle_reaction_round_trips() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::empty()).await;

    assert!(store.toggle_reaction("p1", ReactionType::Flavor));
    assert_eq!(store.my_reactions_for_post("p1"), vec![ReactionType::Flavor]);
    assert!(!store.toggle_reaction("p1", ReactionType::Flavor));
    assert!(store.my_reactions_for_post("p1").is_empty());

    store.flush().await;
    assert_eq!(kv.snapshot("test:reactions").as_deref(), Some("{}"));
}

#[tokio::test]
async fn seeded_reactions_show_without_user_activity() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::demo(base_time())).await;

    assert_eq!(
        store.reactions_for_post("1"),
        vec![ReactionType::Flavor, ReactionType::Practicality]
    );
    assert!(store.my_reactions_for_post("1").is_empty());

    // Toggling a seeded reaction only touches the user's layer.
    assert!(store.toggle_reaction("1", ReactionType::Flavor));
    assert_eq!(
        store.reactions_for_post("1"),
        vec![ReactionType::Flavor, ReactionType::Practicality]
    );
}

#[tokio::test]
async fn user_comments_interleave_with_seeded_ones() {
    let kv = MemoryKv::new();
    let store = fresh_store(&kv, EngagementSeed::demo(base_time())).await;

    let seeded = store.comments_for_post("1");
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded[0].id, "mc1");

    let mine = store.add_comment("1", "Adding chili", "Cook", "u1").unwrap();
    let listed = store.comments_for_post("1");
    assert_eq!(listed[0].id, mine.id);
    assert_eq!(listed[1].id, "mc1");
}

#[tokio::test]
async fn engagement_survives_a_reload() {
    let kv = MemoryKv::new();
    let state = session(kv.clone()).await;
    state.engagement.toggle_reaction("2", ReactionType::Practicality);
    let added = state
        .engagement
        .add_comment("2", "Cheap and fast", "Cook", "u1")
        .unwrap();
    state.flush().await;

    let raw = kv.snapshot("test:reactions").unwrap();
    assert!(raw.contains("practicality"));

    let reloaded = session(kv).await;
    assert_eq!(
        reloaded.engagement.my_reactions_for_post("2"),
        vec![ReactionType::Practicality]
    );
    let comments = reloaded.engagement.comments_for_post("2");
    assert_eq!(comments[0].id, added.id);
    assert_eq!(comments[0].text, "Cheap and fast");
    assert_eq!(comments[1].id, "mc2");
}
