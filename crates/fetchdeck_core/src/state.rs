use crate::view_model::{AppViewModel, PanelStatus, PanelView, WeatherCard, WeatherView};
use crate::{
    Comment, GeocodingResult, LoadState, OverlapPolicy, Post, RequestId, Resource, User,
    WeatherResponse,
};

/// Minimum trimmed query length before a city search is scheduled.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSettings {
    pub overlap_policy: OverlapPolicy,
    pub min_query_chars: usize,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            overlap_policy: OverlapPolicy::default(),
            min_query_chars: MIN_QUERY_CHARS,
        }
    }
}

/// Where the weather panel is pointed.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&GeocodingResult> for Location {
    fn from(city: &GeocodingResult) -> Self {
        Self {
            label: city.display_name(),
            latitude: city.latitude,
            longitude: city.longitude,
        }
    }
}

/// The store: every panel's loading state, mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: StateSettings,
    last_request_id: RequestId,
    users: Resource<Vec<User>>,
    posts: Resource<Vec<Post>>,
    comments_post: Option<u32>,
    comments: Resource<Vec<Comment>>,
    search_query: String,
    cities: Resource<Vec<GeocodingResult>>,
    location: Option<Location>,
    weather: Resource<WeatherResponse>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: StateSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> StateSettings {
        self.settings
    }

    pub fn users(&self) -> &LoadState<Vec<User>> {
        self.users.state()
    }

    pub fn posts(&self) -> &LoadState<Vec<Post>> {
        self.posts.state()
    }

    pub fn comments(&self) -> &LoadState<Vec<Comment>> {
        self.comments.state()
    }

    pub fn comments_post(&self) -> Option<u32> {
        self.comments_post
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn cities(&self) -> &LoadState<Vec<GeocodingResult>> {
        self.cities.state()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn weather(&self) -> &LoadState<WeatherResponse> {
        self.weather.state()
    }

    /// True while any panel still waits on its most recently issued request.
    pub fn is_busy(&self) -> bool {
        self.users.is_awaiting_latest()
            || self.posts.is_awaiting_latest()
            || self.comments.is_awaiting_latest()
            || self.cities.is_awaiting_latest()
            || self.weather.is_awaiting_latest()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            users: panel("Users", self.users(), |user| {
                format!("{} (@{}) <{}>", user.name, user.username, user.email)
            }),
            posts: panel("Posts", self.posts(), |post| format!("#{} {}", post.id, post.title)),
            comments: panel(
                &match self.comments_post {
                    Some(post_id) => format!("Comments on post #{post_id}"),
                    None => "Comments".to_string(),
                },
                self.comments(),
                |comment| {
                    let first_line = comment.body.lines().next().unwrap_or_default();
                    format!("{} <{}>: {}", comment.name, comment.email, first_line)
                },
            ),
            search_query: self.search_query.clone(),
            cities: panel("Cities", self.cities(), |city| {
                format!(
                    "{} ({:.2}, {:.2})",
                    city.display_name(),
                    city.latitude,
                    city.longitude
                )
            }),
            weather: WeatherView {
                location: self.location.as_ref().map(|location| location.label.clone()),
                status: status_of(self.weather(), |_| 1),
                card: self.weather().value().map(WeatherCard::from_response),
            },
            busy: self.is_busy(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and resets it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn users_mut(&mut self) -> &mut Resource<Vec<User>> {
        &mut self.users
    }

    pub(crate) fn posts_mut(&mut self) -> &mut Resource<Vec<Post>> {
        &mut self.posts
    }

    pub(crate) fn comments_mut(&mut self) -> &mut Resource<Vec<Comment>> {
        &mut self.comments
    }

    pub(crate) fn set_comments_post(&mut self, post_id: u32) {
        self.comments_post = Some(post_id);
    }

    /// Stores the raw query; returns whether its trimmed text changed.
    pub(crate) fn set_search_query(&mut self, query: String) -> bool {
        let changed = self.search_query.trim() != query.trim();
        self.search_query = query;
        changed
    }

    pub(crate) fn cities_mut(&mut self) -> &mut Resource<Vec<GeocodingResult>> {
        &mut self.cities
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub(crate) fn weather_mut(&mut self) -> &mut Resource<WeatherResponse> {
        &mut self.weather
    }
}

fn panel<T>(
    title: &str,
    state: &LoadState<Vec<T>>,
    row: impl Fn(&T) -> String,
) -> PanelView {
    PanelView {
        title: title.to_string(),
        status: status_of(state, Vec::len),
        rows: state
            .value()
            .map(|items| items.iter().map(&row).collect())
            .unwrap_or_default(),
    }
}

fn status_of<T>(state: &LoadState<T>, count: impl Fn(&T) -> usize) -> PanelStatus {
    match state {
        LoadState::Idle => PanelStatus::Idle,
        LoadState::Loading => PanelStatus::Loading,
        LoadState::Loaded(value) => PanelStatus::Loaded {
            count: count(value),
        },
        LoadState::Error(error) => PanelStatus::Failed {
            message: error.to_string(),
        },
    }
}
