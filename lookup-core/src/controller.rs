//! Request lifecycle for a single city lookup.
//!
//! The controller is the only writer of [`UiState`]. Every submission takes a
//! fresh generation number; a response that comes back after a newer
//! submission has started is dropped instead of overwriting the newer state.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    config::DEFAULT_TIMEOUT_SECS,
    error::FetchError,
    model::{CityQuery, FeedbackTarget, UiState, WeatherSnapshot},
    provider::WeatherDataSource,
    render::ViewRenderer,
};

pub struct WeatherLookupController {
    source: Arc<dyn WeatherDataSource>,
    renderer: Arc<dyn ViewRenderer>,
    state: watch::Sender<UiState>,
    generation: AtomicU64,
    timeout: Duration,
}

impl WeatherLookupController {
    pub fn new(source: Arc<dyn WeatherDataSource>, renderer: Arc<dyn ViewRenderer>) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            source,
            renderer,
            state,
            generation: AtomicU64::new(0),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Upper bound on a single fetch. Without it a hung connection would pin `Loading`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn show_quick_access(&self, cities: &[String]) {
        self.renderer.render_quick_access_cities(cities);
    }

    /// Run one lookup. Outcomes are reported through state transitions only.
    pub async fn submit_query(&self, raw: &str) {
        let query = match CityQuery::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                let message = err.to_string();
                self.begin(UiState::Failed(message.clone()));
                self.renderer.on_failed(&message);
                self.renderer.shake(FeedbackTarget::Input);
                return;
            }
        };

        let ticket = self.begin(UiState::Loading);
        self.renderer.on_loading();

        let next = match self.fetch_snapshot(&query).await {
            Ok(snapshot) => UiState::Ready(snapshot),
            Err(err) => {
                tracing::warn!(city = %query, error = %err, "weather lookup failed");
                UiState::Failed(query.not_found_message())
            }
        };

        if !self.settle(ticket, next.clone()) {
            tracing::debug!(city = %query, ticket, "discarding superseded response");
            return;
        }

        match &next {
            UiState::Ready(snapshot) => self.renderer.on_ready(snapshot),
            UiState::Failed(message) => {
                self.renderer.on_failed(message);
                self.renderer.shake(FeedbackTarget::Container);
            }
            UiState::Idle | UiState::Loading => {}
        }
    }

    async fn fetch_snapshot(&self, query: &CityQuery) -> Result<WeatherSnapshot, FetchError> {
        let payload = tokio::time::timeout(self.timeout, self.source.fetch_current_conditions(query))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;

        WeatherSnapshot::from_payload(&payload)
    }

    /// Start a new generation and move to `next`. Returns the generation's ticket.
    fn begin(&self, next: UiState) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::debug!(from = state.name(), to = next.name(), ticket, "state transition");
            *state = next;
        });
        ticket
    }

    /// Apply `next` only if no newer submission has started since `ticket`.
    fn settle(&self, ticket: u64, next: UiState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            tracing::debug!(from = state.name(), to = next.name(), ticket, "state transition");
            *state = next;
            true
        })
    }
}
