use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::api::MealDbClient;
use crate::config::{Settings, DEFAULT_BASE_URL};
use crate::error::FinderError;

/// Builder for configuring a [`MealDbClient`]
#[derive(Debug, Default)]
pub struct MealDbClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MealDbClientBuilder {
    /// Start from loaded settings
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{MealDbClientBuilder, Settings};
    ///
    /// let builder = MealDbClientBuilder::from_settings(&Settings::default());
    /// ```
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_url: Some(settings.base_url.clone()),
            timeout: Some(Duration::from_secs(settings.timeout_secs)),
            user_agent: Some(settings.user_agent.clone()),
        }
    }

    /// Point the client at another API root, e.g. a mirror or a test server
    ///
    /// # Example
    /// ```
    /// use recipe_finder::MealDbClient;
    ///
    /// let builder = MealDbClient::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::MealDbClient;
    /// use std::time::Duration;
    ///
    /// let builder = MealDbClient::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `FinderError::Builder` if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created.
    pub fn build(self) -> Result<MealDbClient, FinderError> {
        let defaults = Settings::default();
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let parsed = Url::parse(&base_url)
            .map_err(|e| FinderError::Builder(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FinderError::Builder(format!(
                "Base URL must use http or https, got {:?}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(defaults.timeout_secs)),
            )
            .user_agent(self.user_agent.unwrap_or(defaults.user_agent))
            .build()
            .map_err(|e| FinderError::Builder(format!("Failed to create HTTP client: {}", e)))?;

        Ok(MealDbClient::from_parts(client, base_url))
    }
}
