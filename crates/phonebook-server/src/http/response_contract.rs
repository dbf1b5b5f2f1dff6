// SPDX-License-Identifier: Apache-2.0

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use phonebook_api::{map_error, ApiError, ErrorEnvelopeDto};
use tracing::warn;

#[must_use]
pub(crate) fn api_error_status(err: &ApiError) -> StatusCode {
    StatusCode::from_u16(map_error(err).status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[must_use]
pub(crate) fn api_error_response(err: ApiError, request_id: &str) -> Response {
    let status = api_error_status(&err);
    if status.is_server_error() {
        warn!(code = err.code.as_str(), status = status.as_u16(), "request failed");
    }
    let body = Json(ErrorEnvelopeDto {
        error: err.with_request_id(request_id),
    });
    let mut resp = (status, body).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("1"));
    }
    resp
}
