use serde::{Deserialize, Serialize};

use crate::domain::post::{DietTag, Difficulty, RecipePost};

/// Mutually exclusive cook-time buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookTimeBucket {
    /// 14 minutes or less.
    #[serde(rename = "under-15")]
    Under15,
    /// 15 to 29 minutes.
    #[serde(rename = "under-30")]
    Under30,
    /// 30 minutes or more.
    #[serde(rename = "over-30")]
    Over30,
}

impl CookTimeBucket {
    pub fn contains(&self, minutes: u32) -> bool {
        match self {
            Self::Under15 => minutes < 15,
            Self::Under30 => (15..30).contains(&minutes),
            Self::Over30 => minutes >= 30,
        }
    }
}

/// Discovery filters. Every criterion is optional; an empty selection never
/// excludes a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    pub ingredients: Vec<String>,
    pub cook_time: Option<CookTimeBucket>,
    pub difficulties: Vec<Difficulty>,
    pub diet_tags: Vec<DietTag>,
    pub cuisines: Vec<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        normalized_terms(&self.ingredients).is_empty()
            && self.cook_time.is_none()
            && self.difficulties.is_empty()
            && self.diet_tags.is_empty()
            && normalized_terms(&self.cuisines).is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientMatch {
    /// Number of wanted terms found in at least one ingredient name.
    pub matched: usize,
    /// Number of non-blank wanted terms.
    pub requested: usize,
}

impl IngredientMatch {
    /// Vacuously true when nothing was requested.
    pub fn all(&self) -> bool {
        self.matched == self.requested
    }

    /// 2 when every requested term matched, 1 for a partial match, 0 when
    /// nothing was requested or nothing matched.
    pub fn tier(&self) -> u8 {
        if self.requested == 0 || self.matched == 0 {
            0
        } else if self.all() {
            2
        } else {
            1
        }
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn normalized_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| normalize(term))
        .filter(|term| !term.is_empty())
        .collect()
}

/// Case-insensitive substring match of each wanted term against every
/// ingredient name. Blank terms are ignored.
pub fn matches_ingredients(post: &RecipePost, wanted: &[String]) -> IngredientMatch {
    let wanted = normalized_terms(wanted);
    if wanted.is_empty() {
        return IngredientMatch {
            matched: 0,
            requested: 0,
        };
    }

    let names: Vec<String> = post
        .recipe
        .ingredients
        .iter()
        .map(|ingredient| normalize(&ingredient.name))
        .collect();

    let matched = wanted
        .iter()
        .filter(|term| names.iter().any(|name| name.contains(term.as_str())))
        .count();

    IngredientMatch {
        matched,
        requested: wanted.len(),
    }
}

/// Conjunction of the cook-time, difficulty, diet and cuisine criteria.
/// Ingredients are not part of the predicate; they only feed ranking.
pub fn matches_filters(post: &RecipePost, spec: &FilterSpec) -> bool {
    let recipe = &post.recipe;

    if let Some(bucket) = spec.cook_time {
        if !bucket.contains(recipe.estimated_cook_time_minutes) {
            return false;
        }
    }

    if !spec.difficulties.is_empty() && !spec.difficulties.contains(&recipe.difficulty) {
        return false;
    }

    if !spec.diet_tags.is_empty()
        && !post.diet_tags().iter().any(|tag| spec.diet_tags.contains(tag))
    {
        return false;
    }

    let cuisines = normalized_terms(&spec.cuisines);
    if !cuisines.is_empty() {
        let cuisine = recipe.cuisine.as_deref().map(normalize).unwrap_or_default();
        if !cuisines.iter().any(|term| cuisine.contains(term.as_str())) {
            return false;
        }
    }

    true
}
