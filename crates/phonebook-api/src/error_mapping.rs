// SPDX-License-Identifier: Apache-2.0

use phonebook_core::ErrorCode;
use serde_json::json;

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidArgument => 400,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::PayloadTooLarge => 413,
        ApiErrorCode::Timeout => 503,
        _ => 500,
    };
    ApiErrorMapping { status_code }
}

/// Internal messages are replaced; client errors keep theirs.
impl From<phonebook_core::Error> for ApiError {
    fn from(value: phonebook_core::Error) -> Self {
        match value.code {
            ErrorCode::InvalidArgument => Self::new(
                ApiErrorCode::InvalidArgument,
                value.message,
                json!({}),
                "req-unknown",
            ),
            ErrorCode::NotFound => Self::not_found(value.message),
            _ => Self::internal(),
        }
    }
}
