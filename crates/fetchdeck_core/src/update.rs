use fetchdeck_logging::deck_debug;

use crate::{AppState, Effect, Location, Msg, Request};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let policy = state.settings().overlap_policy;
    let effects = match msg {
        Msg::LoadUsers => {
            let request_id = state.next_request_id();
            state.users_mut().begin(request_id);
            state.mark_dirty();
            vec![Effect::Fetch {
                request_id,
                request: Request::Users,
            }]
        }
        Msg::LoadPosts => {
            let request_id = state.next_request_id();
            state.posts_mut().begin(request_id);
            state.mark_dirty();
            vec![Effect::Fetch {
                request_id,
                request: Request::Posts,
            }]
        }
        Msg::LoadComments { post_id } => {
            let request_id = state.next_request_id();
            state.set_comments_post(post_id);
            state.comments_mut().begin(request_id);
            state.mark_dirty();
            vec![Effect::Fetch {
                request_id,
                request: Request::Comments { post_id },
            }]
        }
        Msg::SearchInputChanged(query) => {
            if !state.set_search_query(query) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            let trimmed = state.search_query().trim().to_string();
            if trimmed.chars().count() < state.settings().min_query_chars {
                state.cities_mut().clear();
                vec![Effect::CancelSearch]
            } else {
                let request_id = state.next_request_id();
                state.cities_mut().begin(request_id);
                vec![Effect::ScheduleSearch {
                    request_id,
                    query: trimmed,
                }]
            }
        }
        Msg::CitySelected(city) => {
            let location = Location::from(&city);
            fetch_weather(&mut state, location)
        }
        Msg::LoadWeather {
            latitude,
            longitude,
        } => {
            let location = Location {
                label: format!("{latitude:.2}, {longitude:.2}"),
                latitude,
                longitude,
            };
            fetch_weather(&mut state, location)
        }
        Msg::RefreshWeather => match state.location().cloned() {
            Some(location) => fetch_weather(&mut state, location),
            None => {
                deck_debug!("RefreshWeather ignored: no location selected");
                Vec::new()
            }
        },
        Msg::UsersLoaded { request_id, result } => {
            if state.users_mut().resolve(request_id, result, policy) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PostsLoaded { request_id, result } => {
            if state.posts_mut().resolve(request_id, result, policy) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CommentsLoaded {
            request_id,
            post_id,
            result,
        } => {
            if state.comments_mut().resolve(request_id, result, policy) {
                state.set_comments_post(post_id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CitiesLoaded { request_id, result } => {
            if state.cities_mut().resolve(request_id, result, policy) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::WeatherLoaded { request_id, result } => {
            if state.weather_mut().resolve(request_id, result, policy) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_weather(state: &mut AppState, location: Location) -> Vec<Effect> {
    let request_id = state.next_request_id();
    let request = Request::Weather {
        latitude: location.latitude,
        longitude: location.longitude,
    };
    state.set_location(location);
    state.weather_mut().begin(request_id);
    state.mark_dirty();
    vec![Effect::Fetch {
        request_id,
        request,
    }]
}
