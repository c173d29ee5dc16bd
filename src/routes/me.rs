use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::profiles::OwnerId;
use crate::domain::projection::RegistrationStatus;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct MeResponse {
    pub owner: OwnerId,
    pub email: Option<String>,
    pub role: Option<String>,
    pub registered: bool,
    pub status: RegistrationStatus,
}

/// Get current caller identity and whether they have a profile
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> Result<Json<MeResponse>, ApiError> {
    let status = state.store.registration_status(&auth.owner).await?;

    Ok(Json(MeResponse {
        owner: auth.owner.clone(),
        email: auth.email.clone(),
        role: auth.role.clone(),
        registered: status.is_registered(),
        status,
    }))
}
