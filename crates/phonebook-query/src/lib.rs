// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cursor;
mod db;
mod engine;
mod filters;
mod limits;
mod row_decode;
mod seed;
mod service;
mod session;
mod store;

pub use cursor::{
    decode_page_token, encode_page_token, CursorError, CursorErrorCode, MAX_PAGE_TOKEN_LEN,
};
pub use db::SqliteStore;
pub use engine::list_page;
pub use filters::{ListPageRequest, ListPageResponse, PhoneFilter, ValidityFilter};
pub use limits::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use seed::{seed_demo_phones, seed_demo_phones_if_empty};
pub use service::PhoneBook;
pub use session::{PageInfo, SessionConfig, SessionStore, SESSION_ID_LEN};
pub use store::{PhoneStore, RecordQuery, StoreError};

pub const CRATE_NAME: &str = "phonebook-query";

#[cfg(test)]
mod query_tests;
