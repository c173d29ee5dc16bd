//! Service layer
//!
//! The profile store: operation semantics over a `ProfileRepository`.

pub mod profile_store;

pub use profile_store::ProfileStore;
