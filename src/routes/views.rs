//! Profile read routes
//!
//! Public projections of any owner's profile. Only the registration probe
//! answers for owners without a profile.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{ApiQuery, DataResponse};
use crate::app::AppState;
use crate::domain::profiles::OwnerId;
use crate::domain::projection::{
    ProfileCheck, ProfileShape, RegistrationStatus, SkillStatus, UnknownShape,
};
use crate::error::ApiError;

/// Parameters of the parameterized checks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckParams {
    pub hours: Option<u64>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub check: String,
    pub result: bool,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub registered: bool,
    pub status: RegistrationStatus,
}

#[derive(Debug, Serialize)]
pub struct SkillStatusResponse {
    pub status: SkillStatus,
}

/// GET /profiles/:owner
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.profile(&OwnerId::new(owner)).await?;
    Ok(DataResponse::new(profile))
}

/// GET /profiles/:owner/views/:shape
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path((owner, shape)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let shape: ProfileShape = shape
        .parse()
        .map_err(|e: UnknownShape| ApiError::bad_request(e.to_string()))?;

    let view = state.store.view(&OwnerId::new(owner), shape).await?;
    Ok(DataResponse::new(view))
}

/// GET /profiles/:owner/checks/:check
pub async fn get_check(
    State(state): State<Arc<AppState>>,
    Path((owner, check)): Path<(String, String)>,
    ApiQuery(params): ApiQuery<CheckParams>,
) -> Result<impl IntoResponse, ApiError> {
    let parsed = ProfileCheck::parse(&check, params.hours, params.location)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let result = state.store.check(&OwnerId::new(owner), &parsed).await?;
    Ok(DataResponse::new(CheckResponse { check, result }))
}

/// GET /profiles/:owner/registration
pub async fn get_registration(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.store.registration_status(&OwnerId::new(owner)).await?;
    Ok(DataResponse::new(RegistrationResponse {
        registered: status.is_registered(),
        status,
    }))
}

/// GET /profiles/:owner/skill-status
pub async fn get_skill_status(
    State(state): State<Arc<AppState>>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.store.skill_status(&OwnerId::new(owner)).await?;
    Ok(DataResponse::new(SkillStatusResponse { status }))
}
