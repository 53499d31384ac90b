//! Value records decoded straight from upstream JSON payloads.
//!
//! Records carry no identity beyond field equality and live for a single
//! fetch-and-display cycle. Field names follow Rust conventions; serde
//! attributes map them onto the upstream spelling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Coordinates as the placeholder API sends them: decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u32,
    pub id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// One match from the geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl GeocodingResult {
    /// "Name, Region, Country" with missing parts skipped.
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Envelope of the geocoding search. The service omits `results` entirely
/// when nothing matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<GeocodingResult>>,
}

impl GeocodingResponse {
    pub fn into_results(self) -> Vec<GeocodingResult> {
        self.results.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub current: CurrentWeather,
    pub daily: DailyWeather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Local ISO-8601 time without offset, e.g. `2024-05-01T14:15`.
    pub time: String,
    pub temperature_2m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    pub weather_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_10m: Option<f64>,
}

impl CurrentWeather {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.weather_code)
    }
}

/// Column-oriented daily forecast: index `i` of every array is day `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub time: Vec<String>,
    pub weather_code: Vec<u16>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability_max: Option<Vec<Option<u8>>>,
}

impl DailyWeather {
    /// Summary for the first forecast day, if every column has one.
    pub fn first_day(&self) -> Option<DaySummary> {
        let date = self.time.first()?;
        let code = *self.weather_code.first()?;
        let max = *self.temperature_2m_max.first()?;
        let min = *self.temperature_2m_min.first()?;
        let precipitation_chance = self
            .precipitation_probability_max
            .as_ref()
            .and_then(|column| column.first().copied().flatten());
        Some(DaySummary {
            date: date.clone(),
            condition: WeatherCondition::from_code(code),
            max,
            min,
            precipitation_chance,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub condition: WeatherCondition,
    pub max: f64,
    pub min: f64,
    pub precipitation_chance: Option<u8>,
}

/// WMO weather interpretation codes grouped the way a forecast card shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    Unknown(u16),
}

impl WeatherCondition {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1 => WeatherCondition::MainlyClear,
            2 => WeatherCondition::PartlyCloudy,
            3 => WeatherCondition::Overcast,
            45 | 48 => WeatherCondition::Fog,
            51 | 53 | 55 | 56 | 57 => WeatherCondition::Drizzle,
            61 | 63 | 65 | 66 | 67 => WeatherCondition::Rain,
            71 | 73 | 75 | 77 => WeatherCondition::Snow,
            80..=82 => WeatherCondition::RainShowers,
            85 | 86 => WeatherCondition::SnowShowers,
            95 | 96 | 99 => WeatherCondition::Thunderstorm,
            other => WeatherCondition::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::MainlyClear => "Mainly clear",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::RainShowers => "Rain showers",
            WeatherCondition::SnowShowers => "Snow showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown(_) => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wmo_codes_group_into_conditions() {
        assert_eq!(WeatherCondition::from_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_code(63), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_code(81), WeatherCondition::RainShowers);
        assert_eq!(WeatherCondition::from_code(99), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_code(42), WeatherCondition::Unknown(42));
        assert_eq!(WeatherCondition::from_code(42).label(), "Unknown");
    }

    #[test]
    fn first_day_needs_every_column() {
        let mut daily = DailyWeather {
            time: vec!["2024-05-01".to_string()],
            weather_code: vec![3],
            temperature_2m_max: vec![18.5],
            temperature_2m_min: vec![9.0],
            precipitation_probability_max: Some(vec![Some(40)]),
        };
        let day = daily.first_day().unwrap();
        assert_eq!(day.date, "2024-05-01");
        assert_eq!(day.condition, WeatherCondition::Overcast);
        assert_eq!(day.precipitation_chance, Some(40));

        daily.temperature_2m_min.clear();
        assert!(daily.first_day().is_none());
    }

    #[test]
    fn display_name_skips_missing_parts() {
        let city = GeocodingResult {
            id: 2950159,
            name: "Berlin".to_string(),
            latitude: 52.52,
            longitude: 13.41,
            elevation: None,
            country: Some("Germany".to_string()),
            country_code: Some("DE".to_string()),
            admin1: None,
            timezone: None,
            population: None,
        };
        assert_eq!(city.display_name(), "Berlin, Germany");
    }
}
