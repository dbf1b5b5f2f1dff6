// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use phonebook_api::{CountriesResponseDto, HealthDto};

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::api_error_response;
use crate::runtime::blocking::run_blocking;
use crate::AppState;

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(HealthDto::ok())
}

pub(crate) async fn countries_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
) -> Response {
    match run_blocking(&state, "countries", |book| book.countries()).await {
        Ok(countries) => Json(CountriesResponseDto { countries }).into_response(),
        Err(err) => api_error_response(err, &trace.request_id),
    }
}
