//! In-memory repository
//!
//! Both tables sit behind a single mutex, so each transaction sees the
//! committed state of the previous one.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Mutation, ProfileRepository};
use crate::domain::profiles::{OwnerId, Profile, ProfileBackup};
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    profiles: HashMap<OwnerId, Profile>,
    backups: HashMap<OwnerId, ProfileBackup>,
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryRepository {
    async fn find(&self, owner: &OwnerId) -> StoreResult<Option<Profile>> {
        Ok(self.inner.lock().profiles.get(owner).cloned())
    }

    async fn insert(&self, owner: &OwnerId, profile: Profile) -> StoreResult<()> {
        let mut tables = self.inner.lock();
        if tables.profiles.contains_key(owner) {
            return Err(StoreError::AlreadyExists);
        }
        tables.profiles.insert(owner.clone(), profile);
        Ok(())
    }

    async fn modify(&self, owner: &OwnerId, mutation: Mutation) -> StoreResult<Profile> {
        let mut tables = self.inner.lock();
        let current = tables.profiles.get_mut(owner).ok_or(StoreError::NotFound)?;

        // Work on a copy so a rejected mutation commits nothing
        let mut next = current.clone();
        mutation(&mut next)?;
        *current = next.clone();
        Ok(next)
    }

    async fn backup(&self, owner: &OwnerId) -> StoreResult<ProfileBackup> {
        let mut tables = self.inner.lock();
        let profile = tables.profiles.get(owner).cloned().ok_or(StoreError::NotFound)?;
        let snapshot = ProfileBackup {
            profile,
            taken_at: Utc::now(),
        };
        tables.backups.insert(owner.clone(), snapshot.clone());
        Ok(snapshot)
    }

    async fn restore(&self, owner: &OwnerId) -> StoreResult<Profile> {
        let mut tables = self.inner.lock();
        if !tables.profiles.contains_key(owner) {
            return Err(StoreError::NotFound);
        }
        let snapshot = tables
            .backups
            .get(owner)
            .map(|b| b.profile.clone())
            .ok_or(StoreError::NotFound)?;
        tables.profiles.insert(owner.clone(), snapshot.clone());
        Ok(snapshot)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoursViolation;

    fn ann() -> Profile {
        Profile::new("Ann", "NYC", vec!["Python".to_string()], 5)
    }

    fn backup_of(repo: &MemoryRepository, owner: &OwnerId) -> Option<ProfileBackup> {
        repo.inner.lock().backups.get(owner).cloned()
    }

    #[tokio::test]
    async fn insert_rejects_second_profile_for_same_owner() {
        let repo = MemoryRepository::new();
        let owner = OwnerId::new("ann");
        repo.insert(&owner, ann()).await.unwrap();

        let err = repo.insert(&owner, ann()).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists));
    }

    #[tokio::test]
    async fn failed_mutation_commits_nothing() {
        let repo = MemoryRepository::new();
        let owner = OwnerId::new("ann");
        repo.insert(&owner, ann()).await.unwrap();

        let err = repo
            .modify(
                &owner,
                Box::new(|p: &mut Profile| {
                    p.name = "Mutated".to_string();
                    Err(StoreError::InvalidHours(HoursViolation::Overflow))
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidHours(_)));
        assert_eq!(repo.find(&owner).await.unwrap(), Some(ann()));
    }

    #[tokio::test]
    async fn modify_requires_existing_profile() {
        let repo = MemoryRepository::new();
        let err = repo
            .modify(&OwnerId::new("nobody"), Box::new(|_: &mut Profile| Ok(())))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn backup_overwrites_previous_snapshot() {
        let repo = MemoryRepository::new();
        let owner = OwnerId::new("ann");
        repo.insert(&owner, ann()).await.unwrap();
        repo.backup(&owner).await.unwrap();

        repo.modify(&owner, Box::new(|p: &mut Profile| {
            p.hours_available = 9;
            Ok(())
        }))
        .await
        .unwrap();
        repo.backup(&owner).await.unwrap();

        let snapshot = backup_of(&repo, &owner).unwrap();
        assert_eq!(snapshot.profile.hours_available, 9);
    }

    #[tokio::test]
    async fn restore_needs_a_snapshot() {
        let repo = MemoryRepository::new();
        let owner = OwnerId::new("ann");
        repo.insert(&owner, ann()).await.unwrap();

        assert!(matches!(repo.restore(&owner).await, Err(StoreError::NotFound)));

        repo.backup(&owner).await.unwrap();
        repo.modify(&owner, Box::new(|p: &mut Profile| {
            p.location = "LA".to_string();
            Ok(())
        }))
        .await
        .unwrap();

        let restored = repo.restore(&owner).await.unwrap();
        assert_eq!(restored, ann());
        assert_eq!(repo.find(&owner).await.unwrap(), Some(ann()));
    }
}
