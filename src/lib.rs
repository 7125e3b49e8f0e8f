pub mod api;
pub mod app;
pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod view;

pub use api::{
    fetch_detail_by_id, fetch_random_batch, search_by_ingredient_or_name, MealDbClient,
    RecipeSource,
};
pub use app::{App, Command, Completion, UiEvent};
pub use builder::MealDbClientBuilder;
pub use config::Settings;
pub use error::{FetchError, FinderError};
pub use model::{MealRecord, RecipeDetail, RecipeSummary, SearchResult};

fn configured_client() -> Result<MealDbClient, FinderError> {
    let settings = Settings::load()?;
    MealDbClientBuilder::from_settings(&settings).build()
}

/// Search by ingredient, falling back to dish name
///
/// The client honours `recipe-finder.toml` and `RECIPE_FINDER__*` variables,
/// so `RECIPE_FINDER__BASE_URL` points these helpers at another server.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// match recipe_finder::search_recipes("chicken").await? {
///     recipe_finder::SearchResult::Found(recipes) => println!("{} recipes", recipes.len()),
///     other => println!("{:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str) -> Result<SearchResult, FinderError> {
    let client = configured_client()?;
    Ok(search_by_ingredient_or_name(&client, query).await)
}

/// Fetch `count` random recipes concurrently; failed slots are dropped
pub async fn random_recipes(count: usize) -> Result<Vec<RecipeSummary>, FinderError> {
    let client = configured_client()?;
    Ok(fetch_random_batch(&client, count).await)
}

/// Fetch the full record for a meal id
pub async fn recipe_details(id: &str) -> Result<RecipeDetail, FinderError> {
    let client = configured_client()?;
    Ok(fetch_detail_by_id(&client, id).await?)
}
