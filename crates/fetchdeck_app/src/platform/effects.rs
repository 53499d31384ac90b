use std::time::Duration;

use fetchdeck_core::{Effect, Msg, Request};
use fetchdeck_engine::{EngineEvent, EngineHandle, Outcome};
use fetchdeck_logging::{deck_info, deck_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch {
                    request_id,
                    request,
                } => {
                    deck_info!("Fetch request_id={} {}", request_id, describe(&request));
                    self.engine.fetch(request_id, request);
                }
                Effect::ScheduleSearch { request_id, query } => {
                    deck_info!(
                        "ScheduleSearch request_id={} query_len={}",
                        request_id,
                        query.chars().count()
                    );
                    self.engine.schedule_search(request_id, query);
                }
                Effect::CancelSearch => self.engine.cancel_search(),
            }
        }
    }

    /// Wait up to `timeout` for the next engine completion, as a store message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

fn describe(request: &Request) -> String {
    match request {
        Request::Users => "users".to_string(),
        Request::Posts => "posts".to_string(),
        Request::Comments { post_id } => format!("comments post_id={post_id}"),
        Request::Weather {
            latitude,
            longitude,
        } => format!("weather lat={latitude} lon={longitude}"),
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed {
            request_id,
            outcome,
        } => {
            if let Some(err) = failure_of(&outcome) {
                deck_warn!("Request {} failed: {}", request_id, err);
            }
            match outcome {
                Outcome::Users(result) => Msg::UsersLoaded { request_id, result },
                Outcome::Posts(result) => Msg::PostsLoaded { request_id, result },
                Outcome::Comments { post_id, result } => Msg::CommentsLoaded {
                    request_id,
                    post_id,
                    result,
                },
                Outcome::Cities(result) => Msg::CitiesLoaded { request_id, result },
                Outcome::Weather(result) => Msg::WeatherLoaded { request_id, result },
            }
        }
    }
}

fn failure_of(outcome: &Outcome) -> Option<fetchdeck_core::FetchError> {
    match outcome {
        Outcome::Users(Err(err))
        | Outcome::Posts(Err(err))
        | Outcome::Comments { result: Err(err), .. }
        | Outcome::Cities(Err(err))
        | Outcome::Weather(Err(err)) => Some(*err),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use fetchdeck_core::FetchError;

    use super::*;

    #[test]
    fn completions_map_to_store_messages() {
        let msg = event_to_msg(EngineEvent::Completed {
            request_id: 4,
            outcome: Outcome::Comments {
                post_id: 2,
                result: Err(FetchError::NoData),
            },
        });

        assert_eq!(
            msg,
            Msg::CommentsLoaded {
                request_id: 4,
                post_id: 2,
                result: Err(FetchError::NoData),
            }
        );
    }

    #[test]
    fn empty_search_maps_to_cities_loaded() {
        let msg = event_to_msg(EngineEvent::Completed {
            request_id: 9,
            outcome: Outcome::Cities(Ok(Vec::new())),
        });

        assert_eq!(
            msg,
            Msg::CitiesLoaded {
                request_id: 9,
                result: Ok(Vec::new()),
            }
        );
    }
}
