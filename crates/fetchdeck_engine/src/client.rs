use fetchdeck_core::{Comment, FetchError, GeocodingResult, Post, User, WeatherResponse};
use fetchdeck_logging::{deck_debug, deck_info};
use serde::de::DeserializeOwned;

use crate::{decode_response, ApiConfig, Endpoint, FetchSettings, Fetcher, ReqwestFetcher};

/// Typed fetch client: one GET, validate, decode. No caching, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient<F = ReqwestFetcher> {
    fetcher: F,
    config: ApiConfig,
}

impl ApiClient<ReqwestFetcher> {
    pub fn new(config: ApiConfig, settings: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(config, ReqwestFetcher::new(settings)?))
    }
}

impl<F: Fetcher> ApiClient<F> {
    pub fn with_fetcher(config: ApiConfig, fetcher: F) -> Self {
        Self { fetcher, config }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>) -> Result<T, FetchError> {
        let url = endpoint.url();
        let response = self.fetcher.get(url).await?;
        deck_debug!(
            "GET {} -> status={:?} bytes={}",
            url,
            response.status,
            response.body.len()
        );
        decode_response(url, response)
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let endpoint = Endpoint::parse(url)?;
        self.fetch(&endpoint).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch(&self.config.users()?).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.fetch(&self.config.posts()?).await
    }

    pub async fn list_comments(&self, post_id: u32) -> Result<Vec<Comment>, FetchError> {
        self.fetch(&self.config.comments(post_id)?).await
    }

    /// A response without a `results` field means no matches, not an error.
    pub async fn search_cities(&self, query: &str) -> Result<Vec<GeocodingResult>, FetchError> {
        let results = self
            .fetch(&self.config.city_search(query)?)
            .await?
            .into_results();
        deck_info!("City search query_len={} matches={}", query.len(), results.len());
        Ok(results)
    }

    pub async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherResponse, FetchError> {
        self.fetch(&self.config.forecast(latitude, longitude)?).await
    }
}
