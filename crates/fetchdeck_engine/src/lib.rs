//! Fetchdeck engine: typed HTTP fetches, endpoint wrappers and debounced search.
mod client;
mod debounce;
mod decode;
mod endpoint;
mod engine;
mod fetch;

pub use client::ApiClient;
pub use debounce::{SearchDebouncer, DEFAULT_SEARCH_DELAY};
pub use decode::decode_response;
pub use endpoint::{ApiConfig, Endpoint};
pub use engine::{EngineError, EngineEvent, EngineHandle, Outcome};
pub use fetch::{FetchSettings, Fetcher, RawResponse, ReqwestFetcher};
