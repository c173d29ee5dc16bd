use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::CallerContext;
use crate::app::AppState;
use crate::error::ErrorResponse;

/// Bearer-token extractor for the `/me` routes.
///
/// The wrapped context's `owner` is the only key a write handler may touch:
/// ```ignore
/// async fn rename(auth: RequireAuth, ApiJson(req): ApiJson<SetNameRequest>) {
///     store.set_name(&auth.owner, req.name).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CallerContext);

impl std::ops::Deref for RequireAuth {
    type Target = CallerContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidFormat,
    /// Signature, expiry, audience or subject rejected; the cause is logged
    InvalidToken,
}

impl AuthError {
    fn message(self) -> &'static str {
        match self {
            Self::MissingToken => "Missing authorization token",
            Self::InvalidFormat => "Authorization header must be `Bearer <token>`",
            Self::InvalidToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = ErrorResponse {
            code: status.as_u16(),
            kind: "Unauthorized".to_string(),
            message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    match value.strip_prefix("Bearer ") {
        Some("") => Err(AuthError::MissingToken),
        Some(token) => Ok(token),
        None => Err(AuthError::InvalidFormat),
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state.verifier.verify_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            AuthError::InvalidToken
        })?;

        let caller = CallerContext::from_claims(&claims).map_err(|reason| {
            tracing::warn!(reason, "Token carries no usable owner");
            AuthError::InvalidToken
        })?;

        Ok(RequireAuth(caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc"))), Ok("abc"));
        assert_eq!(
            bearer_token(&parts_with(None)),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            bearer_token(&parts_with(Some("Bearer "))),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            bearer_token(&parts_with(Some("Basic abc"))),
            Err(AuthError::InvalidFormat)
        );
    }
}
