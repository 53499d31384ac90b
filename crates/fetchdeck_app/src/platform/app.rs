use std::time::{Duration, Instant};

use fetchdeck_core::{update, AppState, Msg};
use fetchdeck_engine::{EngineError, EngineHandle};
use fetchdeck_logging::{deck_debug, deck_warn};
use thiserror::Error;

use super::config::{load_or_default, AppConfig};
use super::effects::EffectRunner;
use super::ui::render::{render, Section};
use crate::cli::{Cli, Command};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SETTLE_MARGIN: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),
}

pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let mut config = load_or_default(cli.config.as_deref());
    if let Some(policy) = cli.policy {
        config.overlap_policy = policy.into();
    }

    let engine = EngineHandle::new(
        config.api.clone(),
        &config.fetch_settings(),
        config.search_delay(),
    )?;
    let mut session = Session::new(&config, EffectRunner::new(engine));

    let section = match cli.command {
        Command::Users => {
            session.dispatch(Msg::LoadUsers);
            Section::Users
        }
        Command::Posts => {
            session.dispatch(Msg::LoadPosts);
            Section::Posts
        }
        Command::Comments { post } => {
            session.dispatch(Msg::LoadComments { post_id: post });
            Section::Comments
        }
        Command::Weather { lat, lon } => {
            session.dispatch(Msg::LoadWeather {
                latitude: lat,
                longitude: lon,
            });
            Section::Weather
        }
        Command::Search {
            query,
            keystroke_ms,
        } => {
            session.type_query(&query, Duration::from_millis(keystroke_ms));
            Section::Cities
        }
        Command::City { query } => {
            session.dispatch(Msg::SearchInputChanged(query));
            session.settle()?;
            let best_match = session
                .state
                .cities()
                .value()
                .and_then(|cities| cities.first().cloned());
            match best_match {
                Some(city) => {
                    session.dispatch(Msg::CitySelected(city));
                    Section::Weather
                }
                None => Section::Cities,
            }
        }
    };

    session.settle()?;
    for line in render(&session.state.view(), section) {
        println!("{line}");
    }
    Ok(())
}

/// The single writer of the store: messages in, effects out.
struct Session {
    state: AppState,
    runner: EffectRunner,
    settle_limit: Duration,
}

impl Session {
    fn new(config: &AppConfig, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_settings(config.state_settings()),
            runner,
            settle_limit: Duration::from_millis(config.resource_timeout_ms)
                + config.search_delay()
                + SETTLE_MARGIN,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            deck_debug!("busy={} after update", state.is_busy());
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Replay `query` one character at a time, draining completions in between.
    fn type_query(&mut self, query: &str, keystroke: Duration) {
        let mut typed = String::new();
        for ch in query.chars() {
            typed.push(ch);
            self.dispatch(Msg::SearchInputChanged(typed.clone()));
            self.pump_for(keystroke);
        }
    }

    fn pump_for(&mut self, window: Duration) {
        let deadline = Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return;
            }
            if let Some(msg) = self.runner.next_msg(remaining.min(POLL_INTERVAL)) {
                self.dispatch(msg);
            }
        }
    }

    /// Dispatch engine completions until every panel has its latest response.
    fn settle(&mut self) -> Result<(), AppError> {
        let deadline = Instant::now() + self.settle_limit;
        while self.state.is_busy() {
            if Instant::now() >= deadline {
                deck_warn!("Gave up waiting after {:?}", self.settle_limit);
                return Err(AppError::Timeout("upstream responses"));
            }
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
        Ok(())
    }
}
