//! Four-state loading model and the request bookkeeping around it.

use fetchdeck_logging::deck_debug;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Monotonic id handed out for every request the store issues.
pub type RequestId = u64;

/// Lifecycle of one asynchronous fetch as a front end observes it.
///
/// Idle → Loading → Loaded | Error, and back to Loading on refresh. There is
/// no terminal state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T, E = FetchError> {
    Idle,
    Loading,
    Loaded(T),
    Error(E),
}

impl<T, E> Default for LoadState<T, E> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T, E> LoadState<T, E> {
    /// Enter `Loading`; allowed from every state so refresh works.
    pub fn begin(&mut self) {
        *self = LoadState::Loading;
    }

    pub fn succeed(&mut self, value: T) {
        *self = LoadState::Loaded(value);
    }

    pub fn fail(&mut self, error: E) {
        *self = LoadState::Error(error);
    }

    pub fn apply(&mut self, result: Result<T, E>) {
        match result {
            Ok(value) => self.succeed(value),
            Err(error) => self.fail(error),
        }
    }

    pub fn clear(&mut self) {
        *self = LoadState::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadState::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// What to do with a completion when several loads on one resource overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Apply every completion; whichever finishes last is what stays visible.
    #[default]
    LastWriteWins,
    /// Apply only the completion of the most recently issued request.
    LatestRequestWins,
}

/// A `LoadState` plus the id of the request that last moved it to `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    state: LoadState<T>,
    latest: Option<RequestId>,
    awaiting: bool,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            latest: None,
            awaiting: false,
        }
    }
}

impl<T> Resource<T> {
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// True until the most recently issued request has completed.
    pub fn is_awaiting_latest(&self) -> bool {
        self.awaiting
    }

    pub fn begin(&mut self, request_id: RequestId) {
        self.latest = Some(request_id);
        self.awaiting = true;
        self.state.begin();
    }

    /// Apply a completion. Returns whether the state changed.
    ///
    /// A cleared resource has no request outstanding, so completions that
    /// arrive after `clear` are dropped under every policy.
    pub fn resolve(
        &mut self,
        request_id: RequestId,
        result: Result<T, FetchError>,
        policy: OverlapPolicy,
    ) -> bool {
        let Some(latest) = self.latest else {
            deck_debug!("Dropping completion request_id={} for a cleared resource", request_id);
            return false;
        };
        if latest == request_id {
            self.awaiting = false;
        } else if policy == OverlapPolicy::LatestRequestWins {
            deck_debug!(
                "Dropping stale completion request_id={} latest={}",
                request_id,
                latest
            );
            return false;
        }
        self.state.apply(result);
        true
    }

    /// Back to `Idle`; any completion still in flight is now stale.
    pub fn clear(&mut self) {
        self.latest = None;
        self.awaiting = false;
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_state_walks_the_happy_path() {
        let mut state: LoadState<Vec<u32>> = LoadState::default();
        assert!(state.is_idle());

        state.begin();
        assert!(state.is_loading());

        state.succeed(vec![1, 2, 3]);
        assert_eq!(state.value(), Some(&vec![1, 2, 3]));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn refresh_from_error_reenters_loading() {
        let mut state: LoadState<u32> = LoadState::Loading;
        state.fail(FetchError::ServerError(500));
        assert_eq!(state.error(), Some(&FetchError::ServerError(500)));

        state.begin();
        assert_eq!(state, LoadState::Loading);
    }

    #[test]
    fn last_write_wins_applies_late_completions() {
        let mut resource = Resource::default();
        resource.begin(1);
        resource.begin(2);

        assert!(resource.resolve(2, Ok("second"), OverlapPolicy::LastWriteWins));
        assert!(resource.resolve(1, Ok("first"), OverlapPolicy::LastWriteWins));
        assert_eq!(resource.state(), &LoadState::Loaded("first"));
    }

    #[test]
    fn latest_request_wins_drops_superseded_completions() {
        let mut resource = Resource::default();
        resource.begin(1);
        resource.begin(2);

        assert!(resource.resolve(2, Ok("second"), OverlapPolicy::LatestRequestWins));
        assert!(!resource.resolve(1, Ok("first"), OverlapPolicy::LatestRequestWins));
        assert_eq!(resource.state(), &LoadState::Loaded("second"));
    }

    #[test]
    fn clear_drops_late_completions_under_last_write_wins() {
        let mut resource: Resource<&str> = Resource::default();
        resource.begin(3);
        resource.clear();

        assert!(!resource.resolve(3, Ok("late"), OverlapPolicy::LastWriteWins));
        assert!(resource.state().is_idle());
    }

    #[test]
    fn awaiting_latest_survives_an_older_completion() {
        let mut resource = Resource::default();
        resource.begin(1);
        resource.begin(2);

        assert!(resource.resolve(1, Ok("first"), OverlapPolicy::LastWriteWins));
        assert!(resource.is_awaiting_latest());
        assert_eq!(resource.state(), &LoadState::Loaded("first"));

        assert!(resource.resolve(2, Ok("second"), OverlapPolicy::LastWriteWins));
        assert!(!resource.is_awaiting_latest());
    }

    #[test]
    fn clear_makes_in_flight_requests_stale_under_latest_request_wins() {
        let mut resource: Resource<&str> = Resource::default();
        resource.begin(7);
        resource.clear();

        assert!(!resource.resolve(7, Ok("late"), OverlapPolicy::LatestRequestWins));
        assert!(resource.state().is_idle());
        assert_eq!(resource.latest_request(), None);
    }
}
