use anyhow::Result;
use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::TokenVerifier;
use crate::config::{Settings, StorageBackend};
use crate::db;
use crate::middleware::{attach_request_id, request_id_layer};
use crate::routes;
use crate::services::ProfileStore;
use crate::store::{MemoryRepository, PgRepository, ProfileRepository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ProfileStore,
    pub settings: Settings,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: ProfileStore, settings: Settings) -> Arc<Self> {
        let verifier = TokenVerifier::new(
            &settings.jwt_secret,
            settings.jwt_issuer.as_deref(),
            &settings.jwt_audience,
        );

        Arc::new(Self {
            store,
            settings,
            verifier,
        })
    }

    /// Connects the configured storage backend and wraps it in a store
    pub async fn connect(settings: Settings) -> Result<Arc<Self>> {
        let repo: Arc<dyn ProfileRepository> = match &settings.storage {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; profiles are lost on restart");
                Arc::new(MemoryRepository::new())
            }
            StorageBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let pool = db::create_pool(database_url, *max_connections).await?;
                let repo = PgRepository::new(pool);
                repo.migrate().await?;
                Arc::new(repo)
            }
        };

        Ok(Self::new(ProfileStore::new(repo), settings))
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Spans at DEBUG to keep INFO output to store events
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(axum::middleware::from_fn(attach_request_id))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .allow_credentials(true)
        .max_age(max_age)
}
