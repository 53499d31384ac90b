use crate::{DaySummary, WeatherResponse};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub users: PanelView,
    pub posts: PanelView,
    pub comments: PanelView,
    pub search_query: String,
    pub cities: PanelView,
    pub weather: WeatherView,
    pub busy: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelView {
    pub title: String,
    pub status: PanelStatus,
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    Loading,
    Loaded { count: usize },
    /// Carries the error description shown next to "try again".
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherView {
    pub location: Option<String>,
    pub status: PanelStatus,
    pub card: Option<WeatherCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    /// Upstream local timestamp, left unformatted for the renderer.
    pub observed_at: String,
    pub condition: &'static str,
    pub temperature: f64,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub today: Option<DaySummary>,
}

impl WeatherCard {
    pub fn from_response(response: &WeatherResponse) -> Self {
        let current = &response.current;
        Self {
            observed_at: current.time.clone(),
            condition: current.condition().label(),
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            today: response.daily.first_day(),
        }
    }
}
