// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::extract_request_trace;
use crate::http::response_contract::api_error_response;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use phonebook_api::ApiError;
use tokio::time::timeout;
use tracing::{info, Instrument};

pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let trace = extract_request_trace(request.headers(), &state);
    request.extensions_mut().insert(trace.clone());

    let span = tracing::info_span!(
        "http.request",
        request_id = %trace.request_id,
        method = %method,
        route = %route,
    );

    let request_timeout = state.api.request_timeout;
    let request_id = trace.request_id.clone();
    let mut response = async move {
        let response = match timeout(request_timeout, next.run(request)).await {
            Ok(resp) => resp,
            Err(_) => api_error_response(ApiError::timeout("request"), &request_id),
        };
        info!(status = response.status().as_u16(), "request finished");
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = axum::http::HeaderValue::from_str(&trace.request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
