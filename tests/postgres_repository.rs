//! Behaviour of the Postgres repository against a live database.
//!
//! Set `TEST_DATABASE_URL` (or `DATABASE_URL`) to run these; without one the
//! tests skip.

use chrono::Utc;
use volunteer_registry::db;
use volunteer_registry::domain::profiles::{OwnerId, Profile};
use volunteer_registry::error::{HoursViolation, StoreError};
use volunteer_registry::store::{PgRepository, ProfileRepository};

async fn maybe_repo() -> Option<PgRepository> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    let pool = db::create_pool(&database_url, 5).await.ok()?;
    let repo = PgRepository::new(pool);
    repo.migrate().await.expect("migrations should run");
    Some(repo)
}

/// Owner key unique to this run so reruns never collide with leftover rows
fn fresh_owner(label: &str) -> OwnerId {
    OwnerId::new(format!("{label}-{}", Utc::now().timestamp_micros()))
}

fn ann() -> Profile {
    Profile::new("Ann", "NYC", vec!["Python".to_string(), "Go".to_string()], 5)
}

macro_rules! repo_or_skip {
    ($name:literal) => {
        match maybe_repo().await {
            Some(repo) => repo,
            None => {
                eprintln!(
                    "Skipping {}: TEST_DATABASE_URL/DATABASE_URL is not set or database is unreachable.",
                    $name
                );
                return;
            }
        }
    };
}

#[tokio::test]
async fn insert_find_and_conflict() {
    let repo = repo_or_skip!("insert_find_and_conflict");
    let owner = fresh_owner("insert");

    assert_eq!(repo.find(&owner).await.unwrap(), None);
    repo.insert(&owner, ann()).await.unwrap();
    assert_eq!(repo.find(&owner).await.unwrap(), Some(ann()));

    let err = repo.insert(&owner, ann()).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));
}

#[tokio::test]
async fn rejected_mutation_rolls_back() {
    let repo = repo_or_skip!("rejected_mutation_rolls_back");
    let owner = fresh_owner("rollback");
    repo.insert(&owner, ann()).await.unwrap();

    let err = repo
        .modify(
            &owner,
            Box::new(|p: &mut Profile| {
                p.name = "Changed".to_string();
                Err(StoreError::InvalidHours(HoursViolation::BelowMinimum))
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidHours(_)));
    assert_eq!(repo.find(&owner).await.unwrap(), Some(ann()));

    let missing = repo
        .modify(&fresh_owner("ghost"), Box::new(|_: &mut Profile| Ok(())))
        .await
        .unwrap_err();
    assert!(matches!(missing, StoreError::NotFound));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_serialize_on_row_lock() {
    let repo = repo_or_skip!("concurrent_increments_serialize_on_row_lock");
    let owner = fresh_owner("concurrent");
    repo.insert(&owner, ann()).await.unwrap();

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let repo = repo.clone();
            let owner = owner.clone();
            tokio::spawn(async move {
                repo.modify(
                    &owner,
                    Box::new(|p: &mut Profile| {
                        p.hours_available += 1;
                        Ok(())
                    }),
                )
                .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = repo.find(&owner).await.unwrap().unwrap();
    assert_eq!(stored.hours_available, 15);
}

#[tokio::test]
async fn backup_upserts_and_restore_reads_latest_snapshot() {
    let repo = repo_or_skip!("backup_upserts_and_restore_reads_latest_snapshot");
    let owner = fresh_owner("backup");
    repo.insert(&owner, ann()).await.unwrap();

    assert!(matches!(repo.restore(&owner).await, Err(StoreError::NotFound)));

    let first = repo.backup(&owner).await.unwrap();
    assert_eq!(first.profile, ann());

    repo.modify(
        &owner,
        Box::new(|p: &mut Profile| {
            p.location = "Boston".to_string();
            Ok(())
        }),
    )
    .await
    .unwrap();
    let second = repo.backup(&owner).await.unwrap();
    assert!(second.taken_at >= first.taken_at);

    repo.modify(
        &owner,
        Box::new(|p: &mut Profile| {
            p.skills = vec!["Cooking".to_string()];
            p.hours_available = 40;
            Ok(())
        }),
    )
    .await
    .unwrap();

    let restored = repo.restore(&owner).await.unwrap();
    let mut expected = ann();
    expected.location = "Boston".to_string();
    assert_eq!(restored, expected);
    assert_eq!(repo.find(&owner).await.unwrap(), Some(expected));

    // The slot survives a restore
    assert!(repo.restore(&owner).await.is_ok());
}

#[tokio::test]
async fn backup_and_restore_need_a_profile() {
    let repo = repo_or_skip!("backup_and_restore_need_a_profile");
    let ghost = fresh_owner("ghost");

    assert!(matches!(repo.backup(&ghost).await, Err(StoreError::NotFound)));
    assert!(matches!(repo.restore(&ghost).await, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn health_check_reaches_database() {
    let repo = repo_or_skip!("health_check_reaches_database");
    assert!(repo.health_check().await);
}
