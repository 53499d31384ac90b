//! Request targets: an absolute URL tagged with the shape it decodes to.

use std::fmt;
use std::marker::PhantomData;

use fetchdeck_core::{Comment, FetchError, GeocodingResponse, Post, User, WeatherResponse};
use serde::{Deserialize, Serialize};
use url::Url;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Immutable URL plus the response type it is expected to decode into.
pub struct Endpoint<T> {
    url: Url,
    shape: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            shape: PhantomData,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let url = Url::parse(raw).map_err(|_| FetchError::InvalidUrl)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl);
        }
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self::new(self.url.clone())
    }
}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("url", &self.url.as_str())
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

/// Base URLs and fixed query parameters of the upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub placeholder_base: String,
    pub geocoding_base: String,
    pub forecast_base: String,
    pub search_result_count: u8,
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            placeholder_base: "https://jsonplaceholder.typicode.com".to_string(),
            geocoding_base: "https://geocoding-api.open-meteo.com/v1".to_string(),
            forecast_base: "https://api.open-meteo.com/v1".to_string(),
            search_result_count: 10,
            language: "en".to_string(),
        }
    }
}

impl ApiConfig {
    /// Same service layout, every base pointed at one host (test servers, mirrors).
    pub fn with_single_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            placeholder_base: base.to_string(),
            geocoding_base: format!("{base}/v1"),
            forecast_base: format!("{base}/v1"),
            ..Self::default()
        }
    }

    pub fn users(&self) -> Result<Endpoint<Vec<User>>, FetchError> {
        join(&self.placeholder_base, &["users"]).map(Endpoint::new)
    }

    pub fn posts(&self) -> Result<Endpoint<Vec<Post>>, FetchError> {
        join(&self.placeholder_base, &["posts"]).map(Endpoint::new)
    }

    pub fn comments(&self, post_id: u32) -> Result<Endpoint<Vec<Comment>>, FetchError> {
        let post_id = post_id.to_string();
        join(&self.placeholder_base, &["posts", post_id.as_str(), "comments"]).map(Endpoint::new)
    }

    /// The query is form-encoded into `name`, so reserved characters are safe.
    pub fn city_search(&self, query: &str) -> Result<Endpoint<GeocodingResponse>, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::InvalidUrl);
        }
        let mut url = join(&self.geocoding_base, &["search"])?;
        url.query_pairs_mut()
            .append_pair("name", query)
            .append_pair("count", &self.search_result_count.to_string())
            .append_pair("language", &self.language)
            .append_pair("format", "json");
        Ok(Endpoint::new(url))
    }

    /// Current conditions plus a one-day daily summary for a coordinate pair.
    ///
    /// `forecast_days=1` asks for today only, so the daily summary describes
    /// the current local date rather than tomorrow.
    pub fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Endpoint<WeatherResponse>, FetchError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 90.0
            || longitude.abs() > 180.0
        {
            return Err(FetchError::InvalidUrl);
        }
        let mut url = join(&self.forecast_base, &["forecast"])?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("timezone", "auto")
            .append_pair("forecast_days", "1");
        Ok(Endpoint::new(url))
    }
}

fn join(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|_| FetchError::InvalidUrl)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl);
    }
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
