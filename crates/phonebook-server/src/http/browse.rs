// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Form};
use phonebook_api::{parse_browse_params, parse_create_phone, ApiError};
use phonebook_query::{ListPageRequest, PageInfo};
use serde::Deserialize;
use tracing::info;

use crate::http::render::{render_add_form, render_error_page, render_listing, ListingView};
use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::api_error_status;
use crate::runtime::blocking::run_blocking;
use crate::AppState;

fn html_error(err: ApiError, request_id: &str) -> Response {
    let err = err.with_request_id(request_id);
    let status = api_error_status(&err);
    (status, Html(render_error_page(status.as_u16(), &err))).into_response()
}

/// Paged HTML listing with session-scoped page numbers and back links.
///
/// Session state is touched only after the storage call succeeded, so a
/// failed or timed-out request leaves the navigation history as it was.
pub(crate) async fn browse_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params = match parse_browse_params(&query) {
        Ok(p) => p,
        Err(err) => return html_error(err, &trace.request_id),
    };

    let live_session = params
        .session_id
        .clone()
        .filter(|sid| state.sessions.session_exists(sid));

    let current_token = if params.prev_page_token.is_empty() {
        params.next_page_token.clone()
    } else {
        match &live_session {
            Some(sid) => state.sessions.go_back(sid, &params.prev_page_token).page_token,
            None => String::new(),
        }
    };

    let req = ListPageRequest {
        page_size: Some(params.page_size),
        page_token: current_token.clone(),
        filter: params.filter(),
    };
    let fetched = run_blocking(&state, "list", move |book| {
        let page = book.list_phone_records(&req)?;
        let countries = book.countries()?;
        Ok((page, countries))
    })
    .await;
    let (page, countries) = match fetched {
        Ok(v) => v,
        Err(err) => return html_error(err, &trace.request_id),
    };

    let next_token = page.next_page_token.as_deref().unwrap_or_default();
    let advanced = live_session.and_then(|sid| {
        state
            .sessions
            .advance_page(&sid, &current_token, next_token)
            .map(|info| (sid, info))
    });
    let (session_id, page_info) = match advanced {
        Some(v) => v,
        None => {
            let count = page.collection_count.unwrap_or(0);
            let sid = state.sessions.start_session(count, next_token);
            (sid, PageInfo::first_page(count))
        }
    };

    let html = render_listing(&ListingView {
        records: &page.records,
        countries: &countries,
        params: &params,
        page: &page_info,
        current_token: &current_token,
        next_page_token: page.next_page_token.as_deref(),
        session_id: &session_id,
    });
    Html(html).into_response()
}

pub(crate) async fn add_form_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
) -> Response {
    match run_blocking(&state, "countries", |book| book.countries()).await {
        Ok(countries) => Html(render_add_form(&countries)).into_response(),
        Err(err) => html_error(err, &trace.request_id),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPhoneForm {
    #[serde(default)]
    country: String,
    #[serde(default)]
    phone: String,
}

pub(crate) async fn add_phone_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    form: Result<Form<AddPhoneForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(f) => f,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return html_error(
                ApiError::payload_too_large(state.api.max_body_bytes),
                &trace.request_id,
            );
        }
        Err(rejection) => {
            return html_error(
                ApiError::invalid_param("form", &rejection.body_text()),
                &trace.request_id,
            );
        }
    };
    let input = match parse_create_phone(&form.country, &form.phone, None) {
        Ok(i) => i,
        Err(err) => return html_error(err, &trace.request_id),
    };
    match run_blocking(&state, "create", move |book| book.create_phone_record(input)).await {
        Ok(record) => {
            info!(id = record.id, "phone added from form");
            (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
        }
        Err(err) => html_error(err, &trace.request_id),
    }
}
