use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use fetchdeck_core::{
    Comment, FetchError, GeocodingResult, Post, Request, RequestId, User, WeatherResponse,
};
use fetchdeck_logging::{deck_debug, deck_info};
use thiserror::Error;

use crate::{ApiClient, ApiConfig, FetchSettings, Fetcher, ReqwestFetcher, SearchDebouncer};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build HTTP client: {0}")]
    Client(FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Typed result of one engine request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Users(Result<Vec<User>, FetchError>),
    Posts(Result<Vec<Post>, FetchError>),
    Comments {
        post_id: u32,
        result: Result<Vec<Comment>, FetchError>,
    },
    Cities(Result<Vec<GeocodingResult>, FetchError>),
    Weather(Result<WeatherResponse, FetchError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        outcome: Outcome,
    },
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        request: Request,
    },
    ScheduleSearch {
        request_id: RequestId,
        query: String,
    },
    CancelSearch,
}

/// Runs fetches on a background tokio runtime; results come back as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        config: ApiConfig,
        settings: &FetchSettings,
        search_delay: Duration,
    ) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(settings).map_err(EngineError::Client)?;
        Self::with_fetcher(config, fetcher, search_delay)
    }

    pub fn with_fetcher<F>(
        config: ApiConfig,
        fetcher: F,
        search_delay: Duration,
    ) -> Result<Self, EngineError>
    where
        F: Fetcher + 'static,
    {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(ApiClient::with_fetcher(config, fetcher));

        thread::spawn(move || {
            let debouncer = SearchDebouncer::new(search_delay, runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &debouncer, &client, command, &event_tx);
            }
            deck_debug!("Engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch(&self, request_id: RequestId, request: Request) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            request,
        });
    }

    pub fn schedule_search(&self, request_id: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleSearch {
            request_id,
            query: query.into(),
        });
    }

    pub fn cancel_search(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSearch);
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command<F: Fetcher + 'static>(
    runtime: &tokio::runtime::Runtime,
    debouncer: &SearchDebouncer,
    client: &Arc<ApiClient<F>>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request,
        } => {
            let client = client.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let outcome = run_request(client.as_ref(), request).await;
                let _ = event_tx.send(EngineEvent::Completed {
                    request_id,
                    outcome,
                });
            });
        }
        EngineCommand::ScheduleSearch { request_id, query } => {
            let client = client.clone();
            let event_tx = event_tx.clone();
            debouncer.schedule(move || async move {
                deck_info!("Searching cities request_id={}", request_id);
                let result = client.search_cities(&query).await;
                let _ = event_tx.send(EngineEvent::Completed {
                    request_id,
                    outcome: Outcome::Cities(result),
                });
            });
        }
        EngineCommand::CancelSearch => debouncer.cancel(),
    }
}

async fn run_request<F: Fetcher>(client: &ApiClient<F>, request: Request) -> Outcome {
    match request {
        Request::Users => Outcome::Users(client.list_users().await),
        Request::Posts => Outcome::Posts(client.list_posts().await),
        Request::Comments { post_id } => Outcome::Comments {
            post_id,
            result: client.list_comments(post_id).await,
        },
        Request::Weather {
            latitude,
            longitude,
        } => Outcome::Weather(client.fetch_weather(latitude, longitude).await),
    }
}
