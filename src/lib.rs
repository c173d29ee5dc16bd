//! Volunteer registry
//!
//! A single-entity profile store: each owner identity holds at most one
//! volunteer profile, written through validated transactions and read
//! through projections.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;

pub use app::{create_app, AppState};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use services::ProfileStore;
