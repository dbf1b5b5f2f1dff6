// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use phonebook_api::{
    parse_create_phone, parse_list_phones_params, parse_phone_id, ApiError,
    CreatePhoneRequestDto, ListPhonesResponseDto,
};

use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::api_error_response;
use crate::runtime::blocking::run_blocking;
use crate::AppState;

pub(crate) async fn list_phones_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let req = match parse_list_phones_params(&query) {
        Ok(p) => p.into_request(),
        Err(err) => return api_error_response(err, &trace.request_id),
    };
    match run_blocking(&state, "list", move |book| book.list_phone_records(&req)).await {
        Ok(page) => Json(ListPhonesResponseDto::from(page)).into_response(),
        Err(err) => api_error_response(err, &trace.request_id),
    }
}

pub(crate) async fn create_phone_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    body: Result<Json<CreatePhoneRequestDto>, JsonRejection>,
) -> Response {
    let Json(dto) = match body {
        Ok(b) => b,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return api_error_response(
                ApiError::payload_too_large(state.api.max_body_bytes),
                &trace.request_id,
            );
        }
        Err(rejection) => {
            return api_error_response(
                ApiError::invalid_param("body", &rejection.body_text()),
                &trace.request_id,
            );
        }
    };
    let input = match parse_create_phone(&dto.country_name, &dto.number, dto.cust_id.as_deref()) {
        Ok(i) => i,
        Err(err) => return api_error_response(err, &trace.request_id),
    };
    match run_blocking(&state, "create", move |book| book.create_phone_record(input)).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => api_error_response(err, &trace.request_id),
    }
}

pub(crate) async fn get_phone_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_phone_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err, &trace.request_id),
    };
    match run_blocking(&state, "find_by_id", move |book| book.get_phone_record(id)).await {
        Ok(record) => Json(record).into_response(),
        Err(err) => api_error_response(err, &trace.request_id),
    }
}

pub(crate) async fn delete_phone_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_phone_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return api_error_response(err, &trace.request_id),
    };
    match run_blocking(&state, "delete", move |book| book.delete_phone_record(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => api_error_response(err, &trace.request_id),
    }
}
