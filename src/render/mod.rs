//! View models built from fetched recipes.
//!
//! Cook time, difficulty, servings, rating and nutrition are cosmetic: they
//! are drawn from the supplied RNG on every render and have no relation to
//! the recipe data. Pass a seeded RNG to make a render reproducible.

pub mod card;
pub mod detail;

pub use card::{render_cards, Card, Difficulty};
pub use detail::{render_detail, split_instructions, DetailAction, DetailView, Nutrition};

use rand::Rng;

/// Cosmetic rating in [3.5, 5.0], rounded to one decimal place
pub fn cosmetic_rating<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let raw: f32 = rng.random_range(3.5..=5.0);
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rating_range_and_precision() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let rating = cosmetic_rating(&mut rng);
            assert!((3.5..=5.0).contains(&rating), "rating {} out of range", rating);
            let tenths = rating * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-4);
        }
    }
}
