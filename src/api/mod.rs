mod client;

pub use client::MealDbClient;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, warn};

use crate::error::FetchError;
use crate::model::{MealRecord, RecipeDetail, RecipeSummary, SearchResult};

/// Read-only access to the remote recipe endpoints
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// `filter.php?i=` - meals using an ingredient; empty when nothing matched
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealRecord>, FetchError>;

    /// `search.php?s=` - meals whose name matches
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>, FetchError>;

    /// `lookup.php?i=` - one full meal record
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, FetchError>;

    /// `random.php` - one random full meal record
    async fn random_meal(&self) -> Result<Option<MealRecord>, FetchError>;
}

/// Search by ingredient first, falling back to a name search when the
/// ingredient filter matched nothing.
pub async fn search_by_ingredient_or_name(source: &dyn RecipeSource, query: &str) -> SearchResult {
    let query = query.trim();
    if query.is_empty() {
        return SearchResult::Empty;
    }

    match try_search(source, query).await {
        Ok(meals) if meals.is_empty() => SearchResult::Empty,
        Ok(meals) => SearchResult::Found(meals.iter().map(MealRecord::to_summary).collect()),
        Err(e) => {
            error!("Error fetching recipes for {:?}: {}", query, e);
            SearchResult::Failed(e.to_string())
        }
    }
}

async fn try_search(source: &dyn RecipeSource, query: &str) -> Result<Vec<MealRecord>, FetchError> {
    let meals = source.filter_by_ingredient(query).await?;
    if !meals.is_empty() {
        debug!("Ingredient filter matched {} meals for {:?}", meals.len(), query);
        return Ok(meals);
    }

    debug!("No ingredient match for {:?}, searching by name", query);
    source.search_by_name(query).await
}

/// Issue `count` random-recipe requests concurrently.
///
/// Results keep request order; slots that fail or come back empty are
/// dropped, so the batch may be shorter than `count`.
pub async fn fetch_random_batch(source: &dyn RecipeSource, count: usize) -> Vec<RecipeSummary> {
    let requests = (0..count).map(|_| source.random_meal());
    let responses = join_all(requests).await;

    responses
        .into_iter()
        .enumerate()
        .filter_map(|(slot, response)| match response {
            Ok(Some(meal)) => Some(meal.to_summary()),
            Ok(None) => {
                warn!("Random slot {} returned no meal", slot);
                None
            }
            Err(e) => {
                warn!("Random slot {} failed: {}", slot, e);
                None
            }
        })
        .collect()
}

/// Look up the full record behind a card
pub async fn fetch_detail_by_id(source: &dyn RecipeSource, id: &str) -> Result<RecipeDetail, FetchError> {
    let found = source
        .lookup_by_id(id)
        .await
        .and_then(|meal| meal.ok_or_else(|| FetchError::NotFound(id.to_string())));

    match found {
        Ok(meal) => Ok(meal.into_detail()),
        Err(e) => {
            error!("Error fetching recipe details for {}: {}", id, e);
            Err(e)
        }
    }
}
