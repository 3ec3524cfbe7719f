use std::collections::HashSet;
use ulid::Ulid;

use crate::domain::pantry::{ShoppingList, ShoppingListItem};
use crate::domain::post::{IngredientItem, RecipePost};

/// Builds a fresh shopping list for `servings`, scaling every numeric
/// quantity by `servings / base_servings`. The post is never modified.
pub fn build_shopping_list(post: &RecipePost, servings: u32, base_servings: u32) -> ShoppingList {
    let factor = f64::from(servings) / f64::from(base_servings.max(1));

    let items = post
        .recipe
        .ingredients
        .iter()
        .map(|ingredient| ShoppingListItem {
            id: ingredient.id.clone(),
            ingredient_name: ingredient.name.clone(),
            quantity_display: quantity_display(ingredient, factor),
        })
        .collect();

    ShoppingList {
        id: format!("{}-shopping-{}", post.post_id, Ulid::new()),
        post_id: post.post_id.clone(),
        servings,
        base_servings,
        items,
    }
}

pub fn quantity_display(ingredient: &IngredientItem, factor: f64) -> String {
    let quantity = ingredient.quantity.trim();
    let unit = ingredient
        .unit
        .as_deref()
        .map(str::trim)
        .filter(|unit| !unit.is_empty());

    if factor != 1.0 {
        if let Some(value) = parse_decimal(quantity) {
            let scaled = format_quantity(value * factor);
            return match unit {
                Some(unit) => format!("{} {}", scaled, unit),
                None => scaled,
            };
        }
    }

    match (quantity.is_empty(), unit) {
        (true, Some(unit)) => unit.to_string(),
        (false, Some(unit)) => format!("{} {}", quantity, unit),
        (_, None) => quantity.to_string(),
    }
}

/// Plain decimals only: "2", "0.5", ".5". Fractions, ranges and words such
/// as "1/2", "2-3" or "pinch" are left alone.
fn parse_decimal(quantity: &str) -> Option<f64> {
    let mut seen_digit = false;
    let mut seen_dot = false;
    for ch in quantity.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    quantity.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Rounds to two decimals and drops trailing zeros ("400", "1.5", "0.33").
fn format_quantity(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Plain-text list for copying or sharing; `checked` holds item ids already
/// in the basket.
pub fn shopping_list_text(
    list: &ShoppingList,
    dish_name: &str,
    checked: &HashSet<String>,
) -> String {
    let plural = if list.servings == 1 { "" } else { "s" };
    let mut lines = vec![
        format!(
            "{} – Shopping list for {} serving{}",
            dish_name, list.servings, plural
        ),
        String::new(),
    ];
    for item in &list.items {
        let mark = if checked.contains(&item.id) { "[x]" } else { "[ ]" };
        if item.quantity_display.is_empty() {
            lines.push(format!("{} {}", mark, item.ingredient_name));
        } else {
            lines.push(format!(
                "{} {} – {}",
                mark, item.ingredient_name, item.quantity_display
            ));
        }
    }
    lines.join("\n")
}
