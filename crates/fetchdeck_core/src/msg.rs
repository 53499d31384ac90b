use crate::{Comment, FetchError, GeocodingResult, Post, RequestId, User, WeatherResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User list requested (first appearance or refresh).
    LoadUsers,
    /// Post list requested (first appearance or refresh).
    LoadPosts,
    /// Comments for one post requested.
    LoadComments { post_id: u32 },
    /// City search input edited; sent for every keystroke.
    SearchInputChanged(String),
    /// User picked a city from the search results.
    CitySelected(GeocodingResult),
    /// Weather requested for raw coordinates.
    LoadWeather { latitude: f64, longitude: f64 },
    /// Reload weather for the current location.
    RefreshWeather,
    /// Engine completion for a user list request.
    UsersLoaded {
        request_id: RequestId,
        result: Result<Vec<User>, FetchError>,
    },
    /// Engine completion for a post list request.
    PostsLoaded {
        request_id: RequestId,
        result: Result<Vec<Post>, FetchError>,
    },
    /// Engine completion for a comments request.
    CommentsLoaded {
        request_id: RequestId,
        post_id: u32,
        result: Result<Vec<Comment>, FetchError>,
    },
    /// Engine completion for a debounced city search.
    CitiesLoaded {
        request_id: RequestId,
        result: Result<Vec<GeocodingResult>, FetchError>,
    },
    /// Engine completion for a weather request.
    WeatherLoaded {
        request_id: RequestId,
        result: Result<WeatherResponse, FetchError>,
    },
    /// Render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
