//! Request ID middleware for request tracing

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header name for request ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Error bodies larger than this are passed through untouched
const MAX_ERROR_BODY: usize = 64 * 1024;

/// Returns the layer pair that assigns a UUID request ID when the caller
/// sent none and echoes it on the response.
pub fn request_id_layer() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    let header_name = HeaderName::from_static(X_REQUEST_ID);

    (
        SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid),
        PropagateRequestIdLayer::new(header_name),
    )
}

/// Extension trait for extracting request ID from headers
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&str> {
        self.get(X_REQUEST_ID)?.to_str().ok()
    }
}

/// Copies the request ID into JSON error bodies as `request_id`.
///
/// Must sit inside `SetRequestIdLayer` so the header is already on the
/// request.
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request.headers().request_id().map(str::to_owned);
    let response = next.run(request).await;

    match request_id {
        Some(id) if is_json_error(&response) => stamp_request_id(response, id).await,
        _ => response,
    }
}

fn is_json_error(response: &Response) -> bool {
    let status = response.status();
    (status.is_client_error() || status.is_server_error())
        && response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"))
}

async fn stamp_request_id(response: Response, request_id: String) -> Response {
    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer error body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(mut fields)) => {
            fields
                .entry("request_id")
                .or_insert(Value::String(request_id));
            match serde_json::to_vec(&fields) {
                Ok(stamped) => Body::from(stamped),
                Err(_) => Body::from(bytes),
            }
        }
        _ => Body::from(bytes),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, body)
}
