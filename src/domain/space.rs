use serde::Serialize;

/// A cuisine, lifestyle or cooking context. Replaces hashtags; every recipe
/// belongs to at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingSpace {
    pub space_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub static SPACES: [CookingSpace; 7] = [
    CookingSpace {
        space_id: "bangladeshi-home",
        name: "Bangladeshi Home Cooking",
        description: "Everyday dishes from Bangladeshi home kitchens.",
    },
    CookingSpace {
        space_id: "student-meals",
        name: "Student Meals",
        description: "Budget-friendly, minimal equipment, quick meals.",
    },
    CookingSpace {
        space_id: "30-min-dinners",
        name: "30-Minute Dinners",
        description: "Weeknight dinners in about half an hour.",
    },
    CookingSpace {
        space_id: "street-food",
        name: "Street Food Recreation",
        description: "Recreate street food favorites at home.",
    },
    CookingSpace {
        space_id: "comfort-food",
        name: "Comfort Food",
        description: "Hearty, familiar, feel-good cooking.",
    },
    CookingSpace {
        space_id: "italian",
        name: "Italian",
        description: "Italian-inspired recipes and classics.",
    },
    CookingSpace {
        space_id: "plant-forward",
        name: "Plant-Forward",
        description: "Vegetables and plants at the center.",
    },
];

pub fn space_by_id(space_id: &str) -> Option<&'static CookingSpace> {
    SPACES.iter().find(|space| space.space_id == space_id)
}
