use std::time::Duration;

use fetchdeck_core::FetchError;
use fetchdeck_logging::{deck_debug, deck_warn};
use reqwest::header::ACCEPT;
use url::Url;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Longest quiet gap allowed while waiting on the server.
    pub request_timeout: Duration,
    /// Ceiling on the whole exchange, body included.
    pub resource_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            resource_timeout: Duration::from_secs(60),
            user_agent: concat!("fetchdeck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// What came back from the wire, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// `None` when the transport produced something that was not an HTTP response.
    pub status: Option<u16>,
    pub body: Vec<u8>,
}

/// One GET against an absolute URL.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.request_timeout)
            .timeout(settings.resource_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|err| {
                deck_warn!("Failed to build HTTP client: {}", err);
                FetchError::Unknown
            })?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        deck_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| map_reqwest_error(url, err))?;

        let status = Some(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(url, err))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Transport failures all surface as `Unknown`; the cause only goes to the log.
fn map_reqwest_error(url: &Url, err: reqwest::Error) -> FetchError {
    let cause = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else {
        "transport"
    };
    deck_warn!("GET {} failed ({}): {}", url, cause, err);
    FetchError::Unknown
}
