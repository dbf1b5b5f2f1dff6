// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use phonebook_core::SessionId;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SESSION_ID_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is forgotten.
    pub ttl: Duration,
    /// Least-recently-used sessions are evicted beyond this.
    pub max_sessions: usize,
    /// Oldest pages are forgotten beyond this; going back past them lands
    /// on page 1.
    pub max_pages_per_session: usize,
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
            max_pages_per_session: 1_000,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Where a page sits in one session's navigation history.
///
/// `page_token` is the token that fetched the page *before* this one, so
/// it doubles as the "previous" link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_token: String,
    pub page_number: u32,
    pub collection_count: u64,
}

impl PageInfo {
    #[must_use]
    pub fn first_page(collection_count: u64) -> Self {
        Self {
            page_token: String::new(),
            page_number: 1,
            collection_count,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    /// Keyed by the token that fetches the page *after* the stored one.
    pages: HashMap<String, PageInfo>,
    collection_count: u64,
    last_touched: Instant,
}

impl SessionState {
    fn record(&mut self, next_token: &str, info: PageInfo, max_pages: usize) {
        if next_token.is_empty() {
            return;
        }
        if !self.pages.contains_key(next_token) && self.pages.len() >= max_pages.max(1) {
            let oldest = self
                .pages
                .iter()
                .min_by_key(|(_, p)| p.page_number)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                self.pages.remove(&key);
            }
        }
        self.pages.insert(next_token.to_string(), info);
    }
}

/// Per-session page history for the browse listing.
///
/// Distinct sessions never observe each other's page numbers or counts.
/// Readers share the lock; mutations take it exclusively.
#[derive(Debug)]
pub struct SessionStore {
    cfg: SessionConfig,
    sessions: RwLock<HashMap<SessionId, SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(cfg: SessionConfig) -> Self {
        Self {
            cfg,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Expired sessions that the sweeper has not removed yet count as absent.
    #[must_use]
    pub fn session_exists(&self, id: &SessionId) -> bool {
        self.read()
            .get(id)
            .is_some_and(|s| s.last_touched.elapsed() <= self.cfg.ttl)
    }

    /// Mints a session whose first page holds `collection_count` rows and
    /// whose continuation token is `first_next_token` (empty when the whole
    /// collection fit on one page).
    pub fn start_session(&self, collection_count: u64, first_next_token: &str) -> SessionId {
        let id = mint_session_id();
        let mut state = SessionState {
            pages: HashMap::new(),
            collection_count,
            last_touched: Instant::now(),
        };
        state.record(
            first_next_token,
            PageInfo::first_page(collection_count),
            self.cfg.max_pages_per_session,
        );

        let mut sessions = self.write();
        if !sessions.contains_key(&id) && sessions.len() >= self.cfg.max_sessions.max(1) {
            evict_expired_locked(&mut sessions, self.cfg.ttl);
            if sessions.len() >= self.cfg.max_sessions.max(1) {
                evict_least_recent_locked(&mut sessions);
            }
        }
        sessions.insert(id.clone(), state);
        debug!(session_id = %id, collection_count, "browse session started");
        id
    }

    /// Records that the page fetched with `current_token` produced
    /// `next_token`, and returns the current page's position.
    ///
    /// The page number is derived from the entry stored under
    /// `current_token`, so it stays right after the client went back.
    /// Returns `None` for an unknown or expired session.
    pub fn advance_page(
        &self,
        id: &SessionId,
        current_token: &str,
        next_token: &str,
    ) -> Option<PageInfo> {
        let mut sessions = self.write();
        let state = sessions
            .get_mut(id)
            .filter(|s| s.last_touched.elapsed() <= self.cfg.ttl)?;

        let page_number = if current_token.is_empty() {
            1
        } else {
            state
                .pages
                .get(current_token)
                .map_or(1, |prev| prev.page_number.saturating_add(1))
        };
        let info = PageInfo {
            page_token: current_token.to_string(),
            page_number,
            collection_count: state.collection_count,
        };
        state.record(next_token, info.clone(), self.cfg.max_pages_per_session);
        state.last_touched = Instant::now();
        Some(info)
    }

    /// Position recorded for the page reached through `page_token`, or
    /// page 1 when nothing was recorded. Never fails.
    #[must_use]
    pub fn go_back(&self, id: &SessionId, page_token: &str) -> PageInfo {
        let mut sessions = self.write();
        let Some(state) = sessions
            .get_mut(id)
            .filter(|s| s.last_touched.elapsed() <= self.cfg.ttl)
        else {
            return PageInfo::first_page(0);
        };
        state.last_touched = Instant::now();
        state
            .pages
            .get(page_token)
            .cloned()
            .unwrap_or_else(|| PageInfo::first_page(state.collection_count))
    }

    /// Drops sessions idle longer than the TTL. Returns how many went.
    pub fn evict_expired(&self) -> usize {
        let mut sessions = self.write();
        let removed = evict_expired_locked(&mut sessions, self.cfg.ttl);
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "expired browse sessions evicted");
        }
        removed
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, SessionState>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionState>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_expired_locked(sessions: &mut HashMap<SessionId, SessionState>, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, s| s.last_touched.elapsed() <= ttl);
    before - sessions.len()
}

fn evict_least_recent_locked(sessions: &mut HashMap<SessionId, SessionState>) {
    let victim = sessions
        .iter()
        .min_by_key(|(_, s)| s.last_touched)
        .map(|(k, _)| k.clone());
    if let Some(k) = victim {
        sessions.remove(&k);
    }
}

fn mint_session_id() -> SessionId {
    let mut rng = rand::thread_rng();
    loop {
        let raw: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        if let Ok(id) = SessionId::new(raw) {
            return id;
        }
    }
}
