use crate::RequestId;

/// A fetch the engine should run on the store's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Users,
    Posts,
    Comments { post_id: u32 },
    Weather { latitude: f64, longitude: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { request_id: RequestId, request: Request },
    /// Replace any pending search with this one, after the debounce delay.
    ScheduleSearch { request_id: RequestId, query: String },
    /// Drop the pending search if it has not started yet.
    CancelSearch,
}
