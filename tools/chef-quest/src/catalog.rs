//! The fixed recipe catalog and the static asset locators shown around it.
//!
//! Everything here is authored data: built at compile time, never mutated.

use crate::errors::QuestError;
use serde::Serialize;

pub const LOGO_URL: &str =
    "https://www.junglejims.com/wp-content/uploads/2023/07/Jungle-Jims-Logo.png";

pub const GALLERY_IMAGE_URLS: [&str; 5] = [
    LOGO_URL,
    "https://upload.wikimedia.org/wikipedia/commons/3/32/Angle%28361666316%29.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/1/1a/Big_Cheese_silo_at_Jungle_Jim%27s.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/4/4d/JungleJim%27s_interior.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/6/68/Jungle_Jim%27s_hot_sauce.jpg",
];

pub const HERO_IMAGE_URL: &str = GALLERY_IMAGE_URLS[1];

pub const COOKING_STEPS: [&str; 4] = [
    "Prep all ingredients you collected from Jungle Jim's",
    "Follow the recipe carefully, tasting as you go",
    "Share your creation on social media with #ChefQuestJungleJims",
    "Come back for another adventure!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngredientClue {
    pub name: &'static str,
    pub clue: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: &'static str,
    pub time: &'static str,
    pub difficulty: Difficulty,
    pub image: &'static str,
    pub ingredients: &'static [IngredientClue],
}

impl Recipe {
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

pub static CATALOG: [Recipe; 3] = [
    Recipe {
        name: "Thai Jungle Curry",
        time: "30 min",
        difficulty: Difficulty::Medium,
        image: GALLERY_IMAGE_URLS[2],
        ingredients: &[
            IngredientClue {
                name: "Mae Ploy Red Curry Paste",
                clue: "Fly to the Asian rainforest where red paste hides in tiny tubs!",
                hint: "Mae Ploy — red tub, gold lid",
            },
            IngredientClue {
                name: "Coconut Milk",
                clue: "Climb the tropical tree for creamy white nectar in cans!",
                hint: "Chaokoh or Aroy-D",
            },
            IngredientClue {
                name: "Thai Eggplant",
                clue: "Hunt the purple orbs in the exotic produce jungle!",
                hint: "Small, round, green stripes",
            },
        ],
    },
    Recipe {
        name: "Italian Jungle Lasagna",
        time: "75 min",
        difficulty: Difficulty::Medium,
        image: GALLERY_IMAGE_URLS[3],
        ingredients: &[
            IngredientClue {
                name: "Barilla Lasagna Noodles",
                clue: "Sail to Italy for flat pasta sheets in blue boxes!",
                hint: "No-boil preferred",
            },
            IngredientClue {
                name: "Rao's Marinara",
                clue: "Find the premium red sauce in glass jars — worth the gold!",
                hint: "Rao's — tastes homemade",
            },
            IngredientClue {
                name: "Ricotta Cheese",
                clue: "Visit the Italian dairy valley for creamy white tubs!",
                hint: "Galbani or store brand",
            },
        ],
    },
    Recipe {
        name: "Mexican Street Corn (Elote)",
        time: "20 min",
        difficulty: Difficulty::Easy,
        image: GALLERY_IMAGE_URLS[4],
        ingredients: &[
            IngredientClue {
                name: "Cotija Cheese",
                clue: "Search the Hispanic cheese case for crumbly white gold!",
                hint: "In wax paper",
            },
            IngredientClue {
                name: "Mexican Crema",
                clue: "Find the sour cream's richer cousin in squeeze bottles!",
                hint: "Cacique brand",
            },
            IngredientClue {
                name: "Tajín Seasoning",
                clue: "Grab the red bottle with the lime-chili punch!",
                hint: "Tajín Clásico",
            },
        ],
    },
];

/// Looks up `index` in `catalog`, rejecting indices past the end.
pub fn recipe(catalog: &[Recipe], index: usize) -> Result<&Recipe, QuestError> {
    catalog.get(index).ok_or_else(|| {
        QuestError::InvalidArgument(format!(
            "recipe index {index} out of range (catalog has {})",
            catalog.len()
        ))
    })
}
