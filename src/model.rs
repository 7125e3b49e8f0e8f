use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Number of indexed ingredient/measure slots in a meal record
pub const INGREDIENT_SLOTS: usize = 20;

/// Ingredients shown on a summary card
pub const SUMMARY_INGREDIENTS: usize = 3;

/// Envelope every endpoint answers with; `meals` is `null` when nothing matched
#[derive(Debug, Deserialize, Default)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

impl MealsEnvelope {
    pub fn into_meals(self) -> Vec<MealRecord> {
        self.meals.unwrap_or_default()
    }
}

/// A meal as returned by the API.
///
/// The filter endpoint only fills id, name and thumbnail; the other
/// endpoints fill everything. Indexed `strIngredientN` / `strMeasureN`
/// fields land in `extra`.
#[derive(Debug, Deserialize, Clone)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MealRecord {
    fn indexed(&self, prefix: &str, slot: usize) -> Option<&str> {
        self.extra
            .get(&format!("{}{}", prefix, slot))
            .and_then(Value::as_str)
    }

    /// Raw ingredient value of a 1-based slot
    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.indexed("strIngredient", slot)
    }

    /// Raw measure value of a 1-based slot
    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.indexed("strMeasure", slot)
    }

    /// (measure, ingredient) for every slot whose ingredient is not blank, in slot order
    pub fn ingredient_pairs(&self) -> Vec<(String, String)> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = self.ingredient(slot)?.trim();
                if ingredient.is_empty() {
                    return None;
                }
                let measure = self.measure(slot).unwrap_or("").trim();
                Some((measure.to_string(), ingredient.to_string()))
            })
            .collect()
    }

    pub fn to_summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            title: self.name.clone(),
            thumbnail_url: self.thumbnail.clone().unwrap_or_default(),
            ingredients: self
                .ingredient_pairs()
                .into_iter()
                .map(|(_, ingredient)| ingredient)
                .take(SUMMARY_INGREDIENTS)
                .collect(),
        }
    }

    pub fn into_detail(self) -> RecipeDetail {
        let ingredients = self.ingredient_pairs();
        RecipeDetail {
            id: self.id,
            title: self.name,
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            category: self.category.filter(|c| !c.trim().is_empty()),
            region: self.area.filter(|a| !a.trim().is_empty()),
            ingredients,
            instructions: self.instructions.unwrap_or_default(),
        }
    }
}

/// Compact recipe used for result cards
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    /// First populated ingredient slots, at most three
    pub ingredients: Vec<String>,
}

/// Full recipe record backing the detail overlay
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub region: Option<String>,
    /// (measure, ingredient name) pairs, blank slots skipped
    pub ingredients: Vec<(String, String)>,
    /// Free-text instructions as delivered by the API
    pub instructions: String,
}

/// Outcome of a user search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(Vec<RecipeSummary>),
    Empty,
    Failed(String),
}
