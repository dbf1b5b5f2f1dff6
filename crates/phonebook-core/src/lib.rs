// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod errors;
mod types;

pub use errors::{Error, ErrorCode, ErrorContext, ExitCode, Result, ResultExt};
pub use types::ids::{SessionId, SESSION_ID_MAX_LEN};

pub const CRATE_NAME: &str = "phonebook-core";

pub const ENV_PHONEBOOK_BIND: &str = "PHONEBOOK_BIND";
pub const ENV_PHONEBOOK_DB_PATH: &str = "PHONEBOOK_DB_PATH";
pub const ENV_PHONEBOOK_LOG_JSON: &str = "PHONEBOOK_LOG_JSON";
