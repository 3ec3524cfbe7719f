use std::cmp::Ordering;

use crate::app::matcher::{matches_filters, matches_ingredients, FilterSpec};
use crate::domain::post::RecipePost;

#[derive(Debug, Clone)]
pub struct RankedPost<'a> {
    pub post: &'a RecipePost,
    pub tier: u8,
}

/// Scores every post that passes the filter predicate and orders the
/// survivors by ingredient tier, then by recency. Posts with identical tier
/// and timestamp keep their input order.
pub fn rank<'a>(posts: &'a [RecipePost], spec: &FilterSpec) -> Vec<RankedPost<'a>> {
    let mut ranked: Vec<RankedPost<'a>> = posts
        .iter()
        .filter(|post| matches_filters(post, spec))
        .map(|post| RankedPost {
            post,
            tier: matches_ingredients(post, &spec.ingredients).tier(),
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}

/// Filtered and ranked copy of `posts`. No pagination; truncate at the call
/// site if needed.
pub fn filter_and_rank(posts: &[RecipePost], spec: &FilterSpec) -> Vec<RecipePost> {
    rank(posts, spec)
        .into_iter()
        .map(|ranked| ranked.post.clone())
        .collect()
}

fn compare_ranked(a: &RankedPost<'_>, b: &RankedPost<'_>) -> Ordering {
    b.tier
        .cmp(&a.tier)
        .then_with(|| b.post.created_at.cmp(&a.post.created_at))
}
