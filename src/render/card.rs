use std::fmt;
use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::RecipeSummary;
use crate::render::cosmetic_rating;

/// Titles longer than this are cut and get an ellipsis
pub const TITLE_LIMIT: usize = 40;

/// Delay between consecutive card entrance animations
pub const ENTRANCE_STAGGER: Duration = Duration::from_millis(100);

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Advanced];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

/// One result card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    pub title: String,
    /// Untruncated title, used as image alt text
    pub full_title: String,
    pub thumbnail_url: String,
    pub ingredients: Vec<String>,
    pub cook_minutes: u32,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub rating: f32,
    /// When this card's fade/slide-in starts, relative to the render
    pub entrance_delay: Duration,
}

/// Cap a title at [`TITLE_LIMIT`] characters, appending an ellipsis when cut
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LIMIT {
        return title.to_string();
    }
    let mut cut: String = title.chars().take(TITLE_LIMIT).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Build display cards in input order
pub fn render_cards<R: Rng + ?Sized>(summaries: &[RecipeSummary], rng: &mut R) -> Vec<Card> {
    summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| Card {
            id: summary.id.clone(),
            title: truncate_title(&summary.title),
            full_title: summary.title.clone(),
            thumbnail_url: summary.thumbnail_url.clone(),
            ingredients: summary.ingredients.clone(),
            cook_minutes: rng.random_range(15..=60),
            difficulty: *Difficulty::ALL.choose(rng).unwrap_or(&Difficulty::Easy),
            servings: rng.random_range(1..=4),
            rating: cosmetic_rating(rng),
            entrance_delay: ENTRANCE_STAGGER * index as u32,
        })
        .collect()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  [{}]", self.title, self.id)?;
        writeln!(
            f,
            "  {} mins | {} | Serves {}",
            self.cook_minutes, self.difficulty, self.servings
        )?;
        if !self.ingredients.is_empty() {
            writeln!(f, "  Ingredients: {}", self.ingredients.join(", "))?;
        }
        write!(f, "  ⭐ {:.1}", self.rating)
    }
}
