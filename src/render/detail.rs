use std::fmt;

use rand::Rng;

use crate::model::RecipeDetail;
use crate::render::cosmetic_rating;

pub const DEFAULT_CATEGORY: &str = "Main Dish";
pub const DEFAULT_REGION: &str = "International";

pub const NUTRITION_DISCLAIMER: &str = "This analysis is an estimate based on available ingredients and this preparation. It should not substitute for a dietitian's or nutritionist's advice.";

/// Synthetic per-serving nutrition facts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nutrition {
    pub calories: u32,
    pub fat_g: u32,
    pub carbs_g: u32,
    pub protein_g: u32,
    pub sugar_g: u32,
}

impl Nutrition {
    /// Independent uniform draws; nothing here comes from the ingredients
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            calories: rng.random_range(200..600),
            fat_g: rng.random_range(5..30),
            carbs_g: rng.random_range(10..40),
            protein_g: rng.random_range(5..25),
            sugar_g: rng.random_range(0..15),
        }
    }
}

/// Buttons under the recipe header. They only acknowledge the click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Share,
    Save,
    Print,
    Comment,
}

impl DetailAction {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "share" => Some(Self::Share),
            "save" => Some(Self::Save),
            "print" => Some(Self::Print),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Share => "share",
            Self::Save => "save",
            Self::Print => "print",
            Self::Comment => "comment",
        }
    }

    pub fn feedback(self) -> String {
        format!("{} action would happen here", self.label())
    }
}

/// Everything the overlay shows for one recipe
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub category: String,
    pub region: String,
    pub rating: f32,
    /// "<measure> <ingredient>" lines
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub nutrition: Nutrition,
}

/// Split instructions into steps on every '.'.
///
/// Fragments are trimmed, empty ones dropped and a period re-appended.
/// This mis-splits abbreviations and decimals ("2.5 cups", "approx. 5 min").
pub fn split_instructions(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("{}.", fragment))
        .collect()
}

fn ingredient_line(measure: &str, ingredient: &str) -> String {
    if measure.is_empty() {
        ingredient.to_string()
    } else {
        format!("{} {}", measure, ingredient)
    }
}

pub fn render_detail<R: Rng + ?Sized>(detail: &RecipeDetail, rng: &mut R) -> DetailView {
    DetailView {
        id: detail.id.clone(),
        title: detail.title.clone(),
        thumbnail_url: detail.thumbnail_url.clone(),
        category: detail
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        region: detail
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        rating: cosmetic_rating(rng),
        ingredients: detail
            .ingredients
            .iter()
            .map(|(measure, ingredient)| ingredient_line(measure, ingredient))
            .collect(),
        steps: split_instructions(&detail.instructions),
        nutrition: Nutrition::synthesize(rng),
    }
}

impl DetailView {
    /// The "Start Cooking" jump: the directions section
    pub fn directions(&self) -> String {
        let mut out = String::from("Directions\n");
        for (n, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", n + 1, step));
        }
        out
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🍽️ {}   🌍 {}", self.category, self.region)?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "⭐⭐⭐⭐⭐ {:.1}", self.rating)?;
        writeln!(f)?;
        writeln!(f, "Ingredients")?;
        for line in &self.ingredients {
            writeln!(f, "  - {}", line)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.directions())?;
        writeln!(f)?;
        writeln!(f, "Nutritional Facts (Per Serving)")?;
        writeln!(f, "  Calories: {}", self.nutrition.calories)?;
        writeln!(f, "  Fat: {}g", self.nutrition.fat_g)?;
        writeln!(f, "  Carbs: {}g", self.nutrition.carbs_g)?;
        writeln!(f, "  Protein: {}g", self.nutrition.protein_g)?;
        writeln!(f, "  Sugar: {}g", self.nutrition.sugar_g)?;
        write!(f, "{}", NUTRITION_DISCLAIMER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn detail() -> RecipeDetail {
        RecipeDetail {
            id: "52771".to_string(),
            title: "Spicy Arrabiata Penne".to_string(),
            thumbnail_url: "https://img.example/52771.jpg".to_string(),
            category: None,
            region: Some("Italian".to_string()),
            ingredients: vec![
                ("1 pound".to_string(), "penne rigate".to_string()),
                (String::new(), "salt".to_string()),
            ],
            instructions: "Bring a large pot of water to a boil. Add kosher salt.".to_string(),
        }
    }

    #[test]
    fn test_split_three_sentences() {
        assert_eq!(
            split_instructions("Boil water. Add pasta. Serve hot."),
            vec!["Boil water.", "Add pasta.", "Serve hot."]
        );
    }

    #[test]
    fn test_split_drops_empty_fragments() {
        assert_eq!(
            split_instructions("  Stir...\r\n Rest . "),
            vec!["Stir.", "Rest."]
        );
        assert!(split_instructions("").is_empty());
    }

    #[test]
    fn test_split_known_decimal_limitation() {
        assert_eq!(
            split_instructions("Add 2.5 cups flour."),
            vec!["Add 2.", "5 cups flour."]
        );
    }

    #[test]
    fn test_render_detail_defaults_and_lines() {
        let view = render_detail(&detail(), &mut StdRng::seed_from_u64(1));

        assert_eq!(view.category, DEFAULT_CATEGORY);
        assert_eq!(view.region, "Italian");
        assert_eq!(view.ingredients, vec!["1 pound penne rigate", "salt"]);
        assert_eq!(view.steps.len(), 2);
    }

    #[test]
    fn test_nutrition_ranges() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let n = Nutrition::synthesize(&mut rng);
            assert!((200..600).contains(&n.calories));
            assert!((5..30).contains(&n.fat_g));
            assert!((10..40).contains(&n.carbs_g));
            assert!((5..25).contains(&n.protein_g));
            assert!(n.sugar_g < 15);
        }
    }

    #[test]
    fn test_action_feedback() {
        assert_eq!(DetailAction::parse("Share"), Some(DetailAction::Share));
        assert_eq!(DetailAction::parse("bookmark"), None);
        assert_eq!(DetailAction::Print.feedback(), "print action would happen here");
    }

    #[test]
    fn test_directions_are_numbered() {
        let view = render_detail(&detail(), &mut StdRng::seed_from_u64(1));
        let directions = view.directions();
        assert!(directions.contains("1. Bring a large pot of water to a boil."));
        assert!(directions.contains("2. Add kosher salt."));
    }
}
