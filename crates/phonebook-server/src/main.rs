// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use phonebook_core::{
    ExitCode, ResultExt, ENV_PHONEBOOK_BIND, ENV_PHONEBOOK_DB_PATH, ENV_PHONEBOOK_LOG_JSON,
};
use phonebook_model::PhoneValidator;
use phonebook_query::{seed_demo_phones_if_empty, PageLimits, SessionConfig, SqliteStore};
use phonebook_server::{
    build_router, spawn_session_sweeper, validate_startup_config_contract, ApiConfig, AppState,
    ServerConfig,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("signal handlers unavailable, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool(ENV_PHONEBOOK_LOG_JSON, true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn load_configs() -> (ServerConfig, ApiConfig, SessionConfig) {
    let server_defaults = ServerConfig::default();
    let server = ServerConfig {
        bind_addr: env::var(ENV_PHONEBOOK_BIND).unwrap_or(server_defaults.bind_addr),
        db_path: env::var(ENV_PHONEBOOK_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or(server_defaults.db_path),
        reset_on_start: env_bool("PHONEBOOK_RESET_ON_START", server_defaults.reset_on_start),
        seed_rows: env_usize("PHONEBOOK_SEED_ROWS", server_defaults.seed_rows),
        shutdown_drain: env_duration_ms(
            "PHONEBOOK_SHUTDOWN_DRAIN_MS",
            duration_ms(server_defaults.shutdown_drain),
        ),
    };

    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        max_body_bytes: env_usize("PHONEBOOK_MAX_BODY_BYTES", api_defaults.max_body_bytes),
        request_timeout: env_duration_ms(
            "PHONEBOOK_REQUEST_TIMEOUT_MS",
            duration_ms(api_defaults.request_timeout),
        ),
        sql_timeout: env_duration_ms(
            "PHONEBOOK_SQL_TIMEOUT_MS",
            duration_ms(api_defaults.sql_timeout),
        ),
    };

    let session_defaults = SessionConfig::default();
    let sessions = SessionConfig {
        ttl: env_duration_ms("PHONEBOOK_SESSION_TTL_MS", duration_ms(session_defaults.ttl)),
        max_sessions: env_usize("PHONEBOOK_MAX_SESSIONS", session_defaults.max_sessions),
        max_pages_per_session: env_usize(
            "PHONEBOOK_MAX_PAGES_PER_SESSION",
            session_defaults.max_pages_per_session,
        ),
        sweep_interval: env_duration_ms(
            "PHONEBOOK_SESSION_SWEEP_MS",
            duration_ms(session_defaults.sweep_interval),
        ),
    };
    (server, api, sessions)
}

fn open_store(server: &ServerConfig) -> Result<SqliteStore, String> {
    let store = SqliteStore::open(&server.db_path)
        .with_context("open database")
        .map_err(|e| e.to_string())?;
    if server.reset_on_start {
        store
            .reset()
            .with_context("reset schema")
            .map_err(|e| e.to_string())?;
    } else {
        store
            .migrate()
            .with_context("migrate schema")
            .map_err(|e| e.to_string())?;
    }
    let countries = store
        .seed_countries()
        .with_context("seed countries")
        .map_err(|e| e.to_string())?;
    let mut rng = rand::thread_rng();
    let phones = seed_demo_phones_if_empty(
        &store,
        PhoneValidator::standard(),
        server.seed_rows,
        &mut rng,
    )
    .with_context("seed demo phones")
    .map_err(|e| e.to_string())?;
    info!(
        db_path = %server.db_path.display(),
        reset = server.reset_on_start,
        countries,
        phones,
        "database ready"
    );
    Ok(store)
}

async fn run() -> Result<(), (ExitCode, String)> {
    let (server, api, sessions) = load_configs();
    validate_startup_config_contract(&api, &sessions)
        .map_err(|e| (ExitCode::Config, format!("invalid startup config: {e}")))?;

    let store = open_store(&server).map_err(|e| (ExitCode::DependencyFailure, e))?;
    let state = AppState::with_config(Arc::new(store), api, sessions, PageLimits::default());
    let sweeper = spawn_session_sweeper(Arc::clone(&state.sessions));

    let listener = TcpListener::bind(&server.bind_addr)
        .await
        .map_err(|e| (ExitCode::DependencyFailure, format!("bind {}: {e}", server.bind_addr)))?;
    info!("phonebook-server listening on {}", server.bind_addr);

    let drain = server.shutdown_drain;
    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(drain_ms = duration_ms(drain), "shutdown requested");
            tokio::time::sleep(drain).await;
        })
        .await;
    sweeper.abort();
    served.map_err(|e| (ExitCode::Internal, format!("server failed: {e}")))
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err((code, message)) => {
            error!(exit = code.as_str(), "{message}");
            std::process::ExitCode::from(code.code())
        }
    }
}
