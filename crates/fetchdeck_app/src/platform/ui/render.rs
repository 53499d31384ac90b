use chrono::{NaiveDate, NaiveDateTime};
use fetchdeck_core::{AppViewModel, DaySummary, PanelStatus, PanelView, WeatherView};

/// Which part of the view a command shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Users,
    Posts,
    Comments,
    Cities,
    Weather,
}

pub fn render(view: &AppViewModel, section: Section) -> Vec<String> {
    match section {
        Section::Users => render_panel(&view.users),
        Section::Posts => render_panel(&view.posts),
        Section::Comments => render_panel(&view.comments),
        Section::Cities => {
            let mut lines = vec![format!("Search: \"{}\"", view.search_query)];
            lines.extend(render_panel(&view.cities));
            lines
        }
        Section::Weather => render_weather(&view.weather),
    }
}

pub fn render_panel(panel: &PanelView) -> Vec<String> {
    let mut lines = vec![status_line(&panel.title, &panel.status)];
    lines.extend(panel.rows.iter().map(|row| format!("  - {row}")));
    lines
}

fn status_line(title: &str, status: &PanelStatus) -> String {
    match status {
        PanelStatus::Idle => format!("{title}: nothing loaded"),
        PanelStatus::Loading => format!("{title}: loading..."),
        PanelStatus::Loaded { count: 0 } => format!("{title}: no results"),
        PanelStatus::Loaded { count } => format!("{title} ({count})"),
        PanelStatus::Failed { message } => format!("{title}: {message} (run again to retry)"),
    }
}

pub fn render_weather(weather: &WeatherView) -> Vec<String> {
    let title = match &weather.location {
        Some(location) => format!("Weather for {location}"),
        None => "Weather".to_string(),
    };
    let Some(card) = &weather.card else {
        return vec![status_line(&title, &weather.status)];
    };

    let mut lines = vec![title];
    let mut headline = format!("  {}, {:.1}°C", card.condition, card.temperature);
    if let Some(feels_like) = card.feels_like {
        headline.push_str(&format!(" (feels like {feels_like:.1}°C)"));
    }
    lines.push(headline);

    let details: Vec<String> = [
        card.humidity.map(|humidity| format!("Humidity {humidity:.0}%")),
        card.wind_speed.map(|wind| format!("Wind {wind:.1} km/h")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        lines.push(format!("  {}", details.join(" | ")));
    }
    lines.push(format!("  Observed {}", format_observed(&card.observed_at)));
    if let Some(today) = &card.today {
        lines.push(format!("  {}", format_day(today)));
    }
    lines
}

/// Upstream times are local and offset-free, e.g. `2024-05-01T14:15`.
fn format_observed(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map(|time| time.format("%a %-d %b %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn format_day(day: &DaySummary) -> String {
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map(|date| date.format("%a %-d %b").to_string())
        .unwrap_or_else(|_| day.date.clone());
    let mut line = format!(
        "{date}: {}, {:.1}°C to {:.1}°C",
        day.condition.label(),
        day.min,
        day.max
    );
    if let Some(chance) = day.precipitation_chance {
        line.push_str(&format!(", {chance}% chance of precipitation"));
    }
    line
}

#[cfg(test)]
mod tests {
    use fetchdeck_core::{WeatherCard, WeatherCondition};
    use pretty_assertions::assert_eq;

    use super::*;

    fn card() -> WeatherCard {
        WeatherCard {
            observed_at: "2024-05-01T14:15".to_string(),
            condition: "Partly cloudy",
            temperature: 17.34,
            feels_like: Some(15.9),
            humidity: Some(48.0),
            wind_speed: None,
            today: Some(DaySummary {
                date: "2024-05-01".to_string(),
                condition: WeatherCondition::Rain,
                max: 19.4,
                min: 8.1,
                precipitation_chance: Some(35),
            }),
        }
    }

    #[test]
    fn loaded_panel_lists_rows() {
        let panel = PanelView {
            title: "Users".to_string(),
            status: PanelStatus::Loaded { count: 1 },
            rows: vec!["Leanne Graham (@Bret) <Sincere@april.biz>".to_string()],
        };

        assert_eq!(
            render_panel(&panel),
            vec![
                "Users (1)".to_string(),
                "  - Leanne Graham (@Bret) <Sincere@april.biz>".to_string(),
            ]
        );
    }

    #[test]
    fn failed_panel_offers_retry() {
        let panel = PanelView {
            title: "Posts".to_string(),
            status: PanelStatus::Failed {
                message: "Server error (status 500)".to_string(),
            },
            rows: Vec::new(),
        };

        assert_eq!(
            render_panel(&panel),
            vec!["Posts: Server error (status 500) (run again to retry)".to_string()]
        );
    }

    #[test]
    fn empty_search_says_no_results() {
        let view = AppViewModel {
            search_query: "Xyzzy".to_string(),
            cities: PanelView {
                title: "Cities".to_string(),
                status: PanelStatus::Loaded { count: 0 },
                rows: Vec::new(),
            },
            ..AppViewModel::default()
        };

        assert_eq!(
            render(&view, Section::Cities),
            vec!["Search: \"Xyzzy\"".to_string(), "Cities: no results".to_string()]
        );
    }

    #[test]
    fn weather_card_formats_times_and_summary() {
        let weather = WeatherView {
            location: Some("Berlin, Germany".to_string()),
            status: PanelStatus::Loaded { count: 1 },
            card: Some(card()),
        };

        assert_eq!(
            render_weather(&weather),
            vec![
                "Weather for Berlin, Germany".to_string(),
                "  Partly cloudy, 17.3°C (feels like 15.9°C)".to_string(),
                "  Humidity 48%".to_string(),
                "  Observed Wed 1 May 14:15".to_string(),
                "  Wed 1 May: Rain, 8.1°C to 19.4°C, 35% chance of precipitation".to_string(),
            ]
        );
    }

    #[test]
    fn unparseable_time_is_shown_raw() {
        assert_eq!(format_observed("soon"), "soon");
    }
}
