pub mod health;
pub mod me;
pub mod profiles;
pub mod views;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Caller's own profile
        .route("/me", get(me::get_me))
        .route(
            "/me/profile",
            post(profiles::register).put(profiles::update),
        )
        .route(
            "/me/profile/skills",
            post(profiles::add_skill).put(profiles::replace_skills),
        )
        .route("/me/profile/hours", put(profiles::reset_hours))
        .route(
            "/me/profile/hours/increment",
            post(profiles::increment_hours),
        )
        .route(
            "/me/profile/hours/decrement",
            post(profiles::decrement_hours),
        )
        .route(
            "/me/profile/location",
            put(profiles::set_location),
        )
        .route("/me/profile/name", put(profiles::set_name))
        .route("/me/profile/backup", post(profiles::backup))
        .route("/me/profile/restore", post(profiles::restore))
        // Read projections of any owner's profile
        .route("/profiles/:owner", get(views::get_profile))
        .route("/profiles/:owner/views/:shape", get(views::get_view))
        .route("/profiles/:owner/checks/:check", get(views::get_check))
        .route(
            "/profiles/:owner/registration",
            get(views::get_registration),
        )
        .route("/profiles/:owner/skill-status", get(views::get_skill_status))
}
