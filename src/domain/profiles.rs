//! Profile domain types
//!
//! One volunteer profile per owner identity, plus the request DTOs used by
//! the write endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of `name`, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of `location`, in characters
pub const MAX_LOCATION_LEN: usize = 100;

/// Maximum length of a single skill, in characters
pub const MAX_SKILL_LEN: usize = 50;

/// Maximum number of skills on one profile
pub const MAX_SKILLS: usize = 10;

/// Opaque identity of the principal owning a profile.
///
/// This is the table key in both the profile and backup tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Volunteer profile entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub location: String,
    /// Insertion order is preserved on every read
    pub skills: Vec<String>,
    pub hours_available: u64,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        skills: Vec<String>,
        hours_available: u64,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            skills,
            hours_available,
        }
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

/// Snapshot stored in the single backup slot of an owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBackup {
    pub profile: Profile,
    pub taken_at: DateTime<Utc>,
}

/// Request DTO for `register` and `update`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub hours_available: u64,
}

impl From<ProfileRequest> for Profile {
    fn from(req: ProfileRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
            skills: req.skills,
            hours_available: req.hours_available,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSkillRequest {
    pub skill: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceSkillsRequest {
    pub skills: Vec<String>,
}

/// Request DTO for every hours mutator (increment, decrement, reset)
#[derive(Debug, Clone, Deserialize)]
pub struct HoursRequest {
    pub hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetLocationRequest {
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetNameRequest {
    pub name: String,
}

/// Response DTO for a successful backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupReceipt {
    pub owner: OwnerId,
    pub taken_at: DateTime<Utc>,
}
