//! Unified error handling
//!
//! `StoreError` is what the profile store returns; `ApiError` wraps it for
//! the HTTP surface and provides consistent error responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Violation of a text field bound (name or location)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextViolation {
    #[error("must not be empty")]
    Empty,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

/// Violation of the skills sequence bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkillsViolation {
    #[error("at least one skill is required")]
    Empty,

    #[error("at most {max} skills are allowed")]
    TooMany { max: usize },

    #[error("each skill must be at most {max} characters")]
    SkillTooLong { max: usize },
}

/// Violation of the hours counter rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HoursViolation {
    #[error("hours must be at least 1")]
    BelowMinimum,

    #[error("cannot remove {requested} hours, only {available} available")]
    InsufficientBalance { available: u64, requested: u64 },

    #[error("hours counter overflow")]
    Overflow,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile not found")]
    NotFound,

    #[error("Profile already exists")]
    AlreadyExists,

    #[error("Invalid skills: {0}")]
    InvalidSkills(SkillsViolation),

    #[error("Invalid hours: {0}")]
    InvalidHours(HoursViolation),

    #[error("Invalid name: {0}")]
    InvalidName(TextViolation),

    #[error("Invalid location: {0}")]
    InvalidLocation(TextViolation),

    #[error("Storage error")]
    Storage(#[from] sqlx::Error),
}

/// Canonical error kinds exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidSkills,
    InvalidHours,
    Internal,
}

impl ErrorKind {
    /// Numeric compatibility code for this kind
    pub fn code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::AlreadyExists => 409,
            Self::InvalidSkills => 403,
            Self::InvalidHours => 400,
            Self::Internal => 500,
        }
    }
}

impl StoreError {
    /// Name and location failures share the `InvalidHours` kind so the
    /// numeric codes stay compatible with existing callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::AlreadyExists => ErrorKind::AlreadyExists,
            Self::InvalidSkills(_) => ErrorKind::InvalidSkills,
            Self::InvalidHours(_) | Self::InvalidName(_) | Self::InvalidLocation(_) => {
                ErrorKind::InvalidHours
            }
            Self::Storage(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> u16 {
        self.kind().code()
    }

    /// True for rejections caused by caller input rather than storage
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body. `request_id` is stamped on by
/// `middleware::attach_request_id`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub kind: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Store(e) => e.code(),
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_kind(&self) -> String {
        match self {
            Self::BadRequest(_) => "BadRequest".to_string(),
            Self::Store(e) => format!("{:?}", e.kind()),
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            // Don't leak storage details
            Self::Store(StoreError::Storage(_)) => "An internal error occurred".to_string(),
            Self::Store(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(StoreError::Storage(e)) => {
                tracing::error!(error = ?e, "Storage error");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            kind: self.error_kind(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
