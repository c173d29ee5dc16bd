//! Profile store
//!
//! Validate-then-commit operations keyed by owner identity, and the read
//! projections over stored profiles. Check ordering is observable: the
//! rename, skill-replace and hours-reset mutators validate their input before
//! looking up the profile, the others look up the profile first.

use std::sync::Arc;
use tracing::instrument;

use crate::domain::profiles::{OwnerId, Profile, ProfileBackup, MAX_SKILLS};
use crate::domain::projection::{
    ProfileCheck, ProfileShape, ProfileView, RegistrationStatus, SkillStatus,
};
use crate::domain::validation;
use crate::error::{HoursViolation, SkillsViolation, StoreError, StoreResult};
use crate::store::ProfileRepository;

#[derive(Clone)]
pub struct ProfileStore {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileStore {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    pub async fn health_check(&self) -> bool {
        self.repo.health_check().await
    }

    // --- Writes -----------------------------------------------------------

    #[instrument(skip(self, owner, profile), fields(owner = %owner))]
    pub async fn register(&self, owner: &OwnerId, profile: Profile) -> StoreResult<Profile> {
        if self.repo.find(owner).await?.is_some() {
            return Err(rejected(StoreError::AlreadyExists));
        }
        validation::validate_profile(&profile).map_err(rejected)?;

        self.repo.insert(owner, profile.clone()).await?;
        tracing::info!("Profile registered");
        Ok(profile)
    }

    #[instrument(skip(self, owner, profile), fields(owner = %owner))]
    pub async fn update(&self, owner: &OwnerId, profile: Profile) -> StoreResult<Profile> {
        let updated = self
            .modify(owner, move |current| {
                validation::validate_profile(&profile)?;
                *current = profile;
                Ok(())
            })
            .await?;
        tracing::info!("Profile updated");
        Ok(updated)
    }

    /// Appends one skill. The skill text itself is only length-checked.
    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn add_skill(&self, owner: &OwnerId, skill: String) -> StoreResult<Profile> {
        self.modify(owner, move |current| {
            if current.skills.len() >= MAX_SKILLS {
                return Err(StoreError::InvalidSkills(SkillsViolation::TooMany {
                    max: MAX_SKILLS,
                }));
            }
            validation::validate_skill(&skill)?;
            current.skills.push(skill);
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn increment_hours(&self, owner: &OwnerId, delta: u64) -> StoreResult<Profile> {
        self.modify(owner, move |current| {
            current.hours_available = current
                .hours_available
                .checked_add(delta)
                .ok_or(StoreError::InvalidHours(HoursViolation::Overflow))?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn decrement_hours(&self, owner: &OwnerId, delta: u64) -> StoreResult<Profile> {
        self.modify(owner, move |current| {
            current.hours_available = current.hours_available.checked_sub(delta).ok_or(
                StoreError::InvalidHours(HoursViolation::InsufficientBalance {
                    available: current.hours_available,
                    requested: delta,
                }),
            )?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn set_location(&self, owner: &OwnerId, location: String) -> StoreResult<Profile> {
        validation::validate_location(&location).map_err(rejected)?;
        self.modify(owner, move |current| {
            current.location = location;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn replace_skills(
        &self,
        owner: &OwnerId,
        skills: Vec<String>,
    ) -> StoreResult<Profile> {
        validation::validate_skills(&skills).map_err(rejected)?;
        self.modify(owner, move |current| {
            current.skills = skills;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn set_name(&self, owner: &OwnerId, name: String) -> StoreResult<Profile> {
        validation::validate_name(&name).map_err(rejected)?;
        self.modify(owner, move |current| {
            current.name = name;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn reset_hours(&self, owner: &OwnerId, hours: u64) -> StoreResult<Profile> {
        validation::validate_hours(hours).map_err(rejected)?;
        self.modify(owner, move |current| {
            current.hours_available = hours;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn backup(&self, owner: &OwnerId) -> StoreResult<ProfileBackup> {
        let snapshot = self.repo.backup(owner).await.map_err(rejected)?;
        tracing::info!(taken_at = %snapshot.taken_at, "Profile backed up");
        Ok(snapshot)
    }

    /// Overwrites the profile with its last backup. The backup slot is kept.
    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn restore(&self, owner: &OwnerId) -> StoreResult<Profile> {
        let profile = self.repo.restore(owner).await.map_err(rejected)?;
        tracing::info!("Profile restored from backup");
        Ok(profile)
    }

    async fn modify<F>(&self, owner: &OwnerId, mutation: F) -> StoreResult<Profile>
    where
        F: FnOnce(&mut Profile) -> StoreResult<()> + Send + 'static,
    {
        self.repo
            .modify(owner, Box::new(mutation))
            .await
            .map_err(rejected)
    }

    // --- Reads ------------------------------------------------------------

    pub async fn profile(&self, owner: &OwnerId) -> StoreResult<Profile> {
        self.repo.find(owner).await?.ok_or(StoreError::NotFound)
    }

    pub async fn view(&self, owner: &OwnerId, shape: ProfileShape) -> StoreResult<ProfileView> {
        Ok(shape.apply(&self.profile(owner).await?))
    }

    pub async fn check(&self, owner: &OwnerId, check: &ProfileCheck) -> StoreResult<bool> {
        Ok(check.evaluate(&self.profile(owner).await?))
    }

    pub async fn skill_status(&self, owner: &OwnerId) -> StoreResult<SkillStatus> {
        Ok(SkillStatus::of(&self.profile(owner).await?))
    }

    /// Never reports `NotFound`; absence is `false`
    pub async fn is_registered(&self, owner: &OwnerId) -> StoreResult<bool> {
        Ok(self.repo.find(owner).await?.is_some())
    }

    pub async fn registration_status(&self, owner: &OwnerId) -> StoreResult<RegistrationStatus> {
        self.is_registered(owner)
            .await
            .map(RegistrationStatus::from_registered)
    }
}

fn rejected(err: StoreError) -> StoreError {
    if err.is_client_error() {
        tracing::debug!(error = %err, "Operation rejected");
    }
    err
}
