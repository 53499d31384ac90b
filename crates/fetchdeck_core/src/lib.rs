//! Fetchdeck core: domain records, error taxonomy and the pure state store.
mod effect;
mod error;
mod load_state;
mod models;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Request};
pub use error::FetchError;
pub use load_state::{LoadState, OverlapPolicy, RequestId, Resource};
pub use models::{
    Address, Comment, Company, CurrentWeather, DailyWeather, DaySummary, GeocodingResponse,
    GeocodingResult, Geo, Post, User, WeatherCondition, WeatherResponse,
};
pub use msg::Msg;
pub use state::{AppState, Location, StateSettings, MIN_QUERY_CHARS};
pub use update::update;
pub use view_model::{AppViewModel, PanelStatus, PanelView, WeatherCard, WeatherView};
