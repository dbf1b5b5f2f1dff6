// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use phonebook_query::{PageLimits, PhoneBook, PhoneStore, SessionConfig, SessionStore};
use tokio::task::JoinHandle;
use tracing::debug;

mod config;
mod http;
mod middleware;
mod runtime;

pub use config::{validate_startup_config_contract, ApiConfig, ServerConfig};

pub const CRATE_NAME: &str = "phonebook-server";

#[derive(Clone)]
pub struct AppState {
    pub book: PhoneBook,
    pub sessions: Arc<SessionStore>,
    pub api: ApiConfig,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn PhoneStore>) -> Self {
        Self::with_config(
            store,
            ApiConfig::default(),
            SessionConfig::default(),
            PageLimits::default(),
        )
    }

    #[must_use]
    pub fn with_config(
        store: Arc<dyn PhoneStore>,
        api: ApiConfig,
        sessions: SessionConfig,
        limits: PageLimits,
    ) -> Self {
        Self {
            book: PhoneBook::new(store, limits),
            sessions: Arc::new(SessionStore::new(sessions)),
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::browse::browse_handler))
        .route("/add", get(http::browse::add_form_handler))
        .route("/addPhone", post(http::browse::add_phone_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/v1/countries", get(http::handlers::countries_handler))
        .route(
            "/v1/phones",
            get(http::phones::list_phones_handler).post(http::phones::create_phone_handler),
        )
        .route(
            "/v1/phones/:id",
            get(http::phones::get_phone_handler).delete(http::phones::delete_phone_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}

/// Periodically drops idle browse sessions until the runtime shuts down.
pub fn spawn_session_sweeper(sessions: Arc<SessionStore>) -> JoinHandle<()> {
    let period = sessions
        .config()
        .sweep_interval
        .max(std::time::Duration::from_millis(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let removed = sessions.evict_expired();
            if removed > 0 {
                debug!(removed, "session sweep");
            }
        }
    })
}
