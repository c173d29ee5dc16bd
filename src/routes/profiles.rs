//! Profile write routes
//!
//! Every handler acts on the authenticated caller's own profile.

use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiJson, Created, WriteResponse};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::profiles::{
    AddSkillRequest, BackupReceipt, HoursRequest, ProfileRequest, ReplaceSkillsRequest,
    SetLocationRequest, SetNameRequest,
};
use crate::error::ApiError;

/// POST /me/profile
pub async fn register(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.register(&auth.owner, req.into()).await?;
    Ok(Created(WriteResponse::new(
        "Profile registered successfully",
        profile,
    )))
}

/// PUT /me/profile
///
/// Replaces all four fields.
pub async fn update(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<ProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.update(&auth.owner, req.into()).await?;
    Ok(WriteResponse::new("Profile updated successfully", profile))
}

/// POST /me/profile/skills
pub async fn add_skill(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<AddSkillRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.add_skill(&auth.owner, req.skill).await?;
    Ok(WriteResponse::new("Skill added successfully", profile))
}

/// PUT /me/profile/skills
pub async fn replace_skills(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<ReplaceSkillsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.replace_skills(&auth.owner, req.skills).await?;
    Ok(WriteResponse::new("Skills updated successfully", profile))
}

/// POST /me/profile/hours/increment
pub async fn increment_hours(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<HoursRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.increment_hours(&auth.owner, req.hours).await?;
    Ok(WriteResponse::new("Hours incremented successfully", profile))
}

/// POST /me/profile/hours/decrement
pub async fn decrement_hours(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<HoursRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.decrement_hours(&auth.owner, req.hours).await?;
    Ok(WriteResponse::new("Hours decremented successfully", profile))
}

/// PUT /me/profile/hours
pub async fn reset_hours(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<HoursRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.reset_hours(&auth.owner, req.hours).await?;
    Ok(WriteResponse::new("Hours reset successfully", profile))
}

/// PUT /me/profile/location
pub async fn set_location(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<SetLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.set_location(&auth.owner, req.location).await?;
    Ok(WriteResponse::new("Location updated successfully", profile))
}

/// PUT /me/profile/name
pub async fn set_name(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    ApiJson(req): ApiJson<SetNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.set_name(&auth.owner, req.name).await?;
    Ok(WriteResponse::new("Name updated successfully", profile))
}

/// POST /me/profile/backup
///
/// Overwrites the caller's single backup slot.
pub async fn backup(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.store.backup(&auth.owner).await?;
    Ok(WriteResponse::new(
        "Profile backed up successfully",
        BackupReceipt {
            owner: auth.owner.clone(),
            taken_at: snapshot.taken_at,
        },
    ))
}

/// POST /me/profile/restore
pub async fn restore(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.store.restore(&auth.owner).await?;
    Ok(WriteResponse::new("Profile restored from backup", profile))
}
