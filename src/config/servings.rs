/// Serving counts the UI lets a user pick for a shopping list. The scaler
/// itself accepts any positive count; callers clamp with this first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServingsRange {
    pub min: u32,
    pub max: u32,
    /// Servings a recipe is written for when it doesn't say.
    pub base: u32,
}

impl Default for ServingsRange {
    fn default() -> Self {
        Self {
            min: 1,
            max: 12,
            base: 2,
        }
    }
}

impl ServingsRange {
    /// Never panics; an inverted range pins every count to `max`.
    pub fn clamp(&self, servings: u32) -> u32 {
        servings.max(self.min).min(self.max)
    }

    pub fn increment(&self, servings: u32) -> u32 {
        self.clamp(servings.saturating_add(1))
    }

    pub fn decrement(&self, servings: u32) -> u32 {
        self.clamp(servings.saturating_sub(1))
    }
}
