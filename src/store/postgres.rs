//! PostgreSQL repository
//!
//! Writes run inside a database transaction holding a row lock on the owner.
//! An uncommitted `sqlx::Transaction` rolls back when dropped, so every early
//! return leaves the tables untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use super::{Mutation, ProfileRepository};
use crate::db;
use crate::domain::profiles::{OwnerId, Profile, ProfileBackup};
use crate::error::{HoursViolation, StoreError, StoreResult};

/// Database row for a profile
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    name: String,
    location: String,
    skills: Vec<String>,
    hours_available: i64,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            name: row.name,
            location: row.location,
            skills: row.skills,
            // The column carries a CHECK (hours_available >= 0)
            hours_available: u64::try_from(row.hours_available).unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BackupRow {
    taken_at: DateTime<Utc>,
}

fn hours_column(hours: u64) -> StoreResult<i64> {
    i64::try_from(hours).map_err(|_| StoreError::InvalidHours(HoursViolation::Overflow))
}

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations from `migrations/`
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    async fn lock_profile(
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
    ) -> StoreResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT name, location, skills, hours_available
            FROM profiles
            WHERE owner = $1
            FOR UPDATE
            "#,
        )
        .bind(owner.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn write_profile(
        tx: &mut Transaction<'_, Postgres>,
        owner: &OwnerId,
        profile: &Profile,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                name = $2,
                location = $3,
                skills = $4,
                hours_available = $5,
                updated_at = NOW()
            WHERE owner = $1
            "#,
        )
        .bind(owner.as_str())
        .bind(&profile.name)
        .bind(&profile.location)
        .bind(&profile.skills)
        .bind(hours_column(profile.hours_available)?)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PgRepository {
    async fn find(&self, owner: &OwnerId) -> StoreResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT name, location, skills, hours_available
            FROM profiles
            WHERE owner = $1
            "#,
        )
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn insert(&self, owner: &OwnerId, profile: Profile) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (owner, name, location, skills, hours_available)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (owner) DO NOTHING
            "#,
        )
        .bind(owner.as_str())
        .bind(&profile.name)
        .bind(&profile.location)
        .bind(&profile.skills)
        .bind(hours_column(profile.hours_available)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists);
        }
        Ok(())
    }

    async fn modify(&self, owner: &OwnerId, mutation: Mutation) -> StoreResult<Profile> {
        let mut tx = self.pool.begin().await?;

        let mut profile = Self::lock_profile(&mut tx, owner)
            .await?
            .ok_or(StoreError::NotFound)?;
        mutation(&mut profile)?;
        Self::write_profile(&mut tx, owner, &profile).await?;

        tx.commit().await?;
        Ok(profile)
    }

    async fn backup(&self, owner: &OwnerId) -> StoreResult<ProfileBackup> {
        let mut tx = self.pool.begin().await?;

        let profile = Self::lock_profile(&mut tx, owner)
            .await?
            .ok_or(StoreError::NotFound)?;

        let row = sqlx::query_as::<_, BackupRow>(
            r#"
            INSERT INTO profile_backups (owner, name, location, skills, hours_available, taken_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (owner) DO UPDATE SET
                name = EXCLUDED.name,
                location = EXCLUDED.location,
                skills = EXCLUDED.skills,
                hours_available = EXCLUDED.hours_available,
                taken_at = EXCLUDED.taken_at
            RETURNING taken_at
            "#,
        )
        .bind(owner.as_str())
        .bind(&profile.name)
        .bind(&profile.location)
        .bind(&profile.skills)
        .bind(hours_column(profile.hours_available)?)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ProfileBackup {
            profile,
            taken_at: row.taken_at,
        })
    }

    async fn restore(&self, owner: &OwnerId) -> StoreResult<Profile> {
        let mut tx = self.pool.begin().await?;

        Self::lock_profile(&mut tx, owner)
            .await?
            .ok_or(StoreError::NotFound)?;

        let snapshot = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT name, location, skills, hours_available
            FROM profile_backups
            WHERE owner = $1
            "#,
        )
        .bind(owner.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .map(Profile::from)
        .ok_or(StoreError::NotFound)?;

        Self::write_profile(&mut tx, owner, &snapshot).await?;

        tx.commit().await?;
        Ok(snapshot)
    }

    async fn health_check(&self) -> bool {
        db::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_beyond_bigint_are_rejected() {
        assert_eq!(hours_column(42).unwrap(), 42);
        assert!(matches!(
            hours_column(u64::MAX),
            Err(StoreError::InvalidHours(HoursViolation::Overflow))
        ));
    }

    #[test]
    fn row_converts_to_profile() {
        let row = ProfileRow {
            name: "Ann".to_string(),
            location: "NYC".to_string(),
            skills: vec!["Python".to_string(), "Go".to_string()],
            hours_available: 5,
        };
        let profile = Profile::from(row);
        assert_eq!(profile.skills, vec!["Python", "Go"]);
        assert_eq!(profile.hours_available, 5);
    }
}
