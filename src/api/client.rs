use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::api::RecipeSource;
use crate::builder::MealDbClientBuilder;
use crate::error::FetchError;
use crate::model::{MealRecord, MealsEnvelope};

/// reqwest-backed client for TheMealDB
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn builder() -> MealDbClientBuilder {
        MealDbClientBuilder::default()
    }

    pub(crate) fn from_parts(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<MealRecord>, FetchError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let envelope: MealsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.into_meals())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealRecord>, FetchError> {
        self.get_meals("filter.php", &[("i", ingredient)]).await
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<MealRecord>, FetchError> {
        self.get_meals("search.php", &[("s", name)]).await
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, FetchError> {
        Ok(self.get_meals("lookup.php", &[("i", id)]).await?.into_iter().next())
    }

    async fn random_meal(&self) -> Result<Option<MealRecord>, FetchError> {
        Ok(self.get_meals("random.php", &[]).await?.into_iter().next())
    }
}
