//! Persistence for the profile and backup tables
//!
//! Every method is one atomic transaction on one owner key. A failed
//! transaction leaves both tables untouched.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::profiles::{OwnerId, Profile, ProfileBackup};
use crate::error::StoreResult;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Read-modify-write step applied to an existing profile. Returning an error
/// aborts the transaction.
pub type Mutation = Box<dyn FnOnce(&mut Profile) -> StoreResult<()> + Send>;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, owner: &OwnerId) -> StoreResult<Option<Profile>>;

    /// Fails with `AlreadyExists` when the owner has a profile
    async fn insert(&self, owner: &OwnerId, profile: Profile) -> StoreResult<()>;

    /// Applies `mutation` to the owner's profile and commits the result.
    /// Fails with `NotFound` when the owner has no profile.
    async fn modify(&self, owner: &OwnerId, mutation: Mutation) -> StoreResult<Profile>;

    /// Copies the current profile into the backup slot, replacing any
    /// previous snapshot
    async fn backup(&self, owner: &OwnerId) -> StoreResult<ProfileBackup>;

    /// Overwrites the profile with the backup slot. `NotFound` when either
    /// the profile or the snapshot is missing.
    async fn restore(&self, owner: &OwnerId) -> StoreResult<Profile>;

    async fn health_check(&self) -> bool;
}
