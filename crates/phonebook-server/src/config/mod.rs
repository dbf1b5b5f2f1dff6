// SPDX-License-Identifier: Apache-2.0

use phonebook_query::SessionConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    /// Upper bound on one storage call, including time queued for the
    /// blocking pool.
    pub sql_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_secs(5),
            sql_timeout: Duration::from_millis(2_000),
        }
    }
}

/// Process-level settings that only `main` reads.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub reset_on_start: bool,
    pub seed_rows: usize,
    pub shutdown_drain: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: PathBuf::from("phones.db"),
            reset_on_start: true,
            seed_rows: 200,
            shutdown_drain: Duration::from_millis(500),
        }
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    sessions: &SessionConfig,
) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("api body limit must be > 0".to_string());
    }
    if api.request_timeout.is_zero() || api.sql_timeout.is_zero() {
        return Err("timeouts must be > 0".to_string());
    }
    if sessions.ttl.is_zero() || sessions.sweep_interval.is_zero() {
        return Err("session ttl and sweep interval must be > 0".to_string());
    }
    if sessions.max_sessions == 0 || sessions.max_pages_per_session == 0 {
        return Err("session capacity limits must be > 0".to_string());
    }
    Ok(())
}
