//! Read projections over a stored profile
//!
//! `project` is the one generic capability: it copies the selected fields of
//! a profile into a `ProfileView`. Named shapes and derived checks are thin
//! layers over it.

use serde::Serialize;
use std::str::FromStr;

use super::profiles::Profile;
use super::validation::{is_profile_incomplete, is_profile_valid};

/// Field selector for projections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Location,
    Skills,
    HoursAvailable,
    SkillCount,
    SkillStatus,
}

/// "Valid Skills" when the profile has at least one skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillStatus {
    #[serde(rename = "Valid Skills")]
    Valid,
    #[serde(rename = "Invalid Skills")]
    Invalid,
}

impl SkillStatus {
    pub fn of(profile: &Profile) -> Self {
        if has_skill(profile) {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationStatus {
    Registered,
    #[serde(rename = "Not Registered")]
    NotRegistered,
}

impl RegistrationStatus {
    pub fn from_registered(registered: bool) -> Self {
        if registered {
            Self::Registered
        } else {
            Self::NotRegistered
        }
    }

    pub fn is_registered(self) -> bool {
        self == Self::Registered
    }
}

/// Projected subset of a profile. Unselected fields are omitted when
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_available: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_status: Option<SkillStatus>,
}

pub fn project(profile: &Profile, fields: &[ProfileField]) -> ProfileView {
    let mut view = ProfileView::default();
    for field in fields {
        match field {
            ProfileField::Name => view.name = Some(profile.name.clone()),
            ProfileField::Location => view.location = Some(profile.location.clone()),
            ProfileField::Skills => view.skills = Some(profile.skills.clone()),
            ProfileField::HoursAvailable => view.hours_available = Some(profile.hours_available),
            ProfileField::SkillCount => view.skill_count = Some(profile.skill_count()),
            ProfileField::SkillStatus => view.skill_status = Some(SkillStatus::of(profile)),
        }
    }
    view
}

/// Named projection shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    Full,
    Skills,
    Hours,
    Location,
    Name,
    SkillCount,
    Summary,
    LocationSkills,
    LocationHours,
    LocationSkillCount,
    SkillsHours,
    NameHours,
    NameLocation,
    SkillCountHours,
    HoursSkillStatus,
}

impl ProfileShape {
    pub const ALL: [ProfileShape; 15] = [
        Self::Full,
        Self::Skills,
        Self::Hours,
        Self::Location,
        Self::Name,
        Self::SkillCount,
        Self::Summary,
        Self::LocationSkills,
        Self::LocationHours,
        Self::LocationSkillCount,
        Self::SkillsHours,
        Self::NameHours,
        Self::NameLocation,
        Self::SkillCountHours,
        Self::HoursSkillStatus,
    ];

    pub fn fields(self) -> &'static [ProfileField] {
        use ProfileField as F;
        match self {
            Self::Full => &[F::Name, F::Location, F::Skills, F::HoursAvailable],
            Self::Skills => &[F::Skills],
            Self::Hours => &[F::HoursAvailable],
            Self::Location => &[F::Location],
            Self::Name => &[F::Name],
            Self::SkillCount => &[F::SkillCount],
            Self::Summary => &[F::Name, F::Location, F::SkillCount],
            Self::LocationSkills => &[F::Location, F::Skills],
            Self::LocationHours => &[F::Location, F::HoursAvailable],
            Self::LocationSkillCount => &[F::Location, F::SkillCount],
            Self::SkillsHours => &[F::Skills, F::HoursAvailable],
            Self::NameHours => &[F::Name, F::HoursAvailable],
            Self::NameLocation => &[F::Name, F::Location],
            Self::SkillCountHours => &[F::SkillCount, F::HoursAvailable],
            Self::HoursSkillStatus => &[F::HoursAvailable, F::SkillStatus],
        }
    }

    /// Canonical path segment
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Skills => "skills",
            Self::Hours => "hours",
            Self::Location => "location",
            Self::Name => "name",
            Self::SkillCount => "skill-count",
            Self::Summary => "summary",
            Self::LocationSkills => "location-skills",
            Self::LocationHours => "location-hours",
            Self::LocationSkillCount => "location-skill-count",
            Self::SkillsHours => "skills-hours",
            Self::NameHours => "name-hours",
            Self::NameLocation => "name-location",
            Self::SkillCountHours => "skill-count-hours",
            Self::HoursSkillStatus => "hours-skill-status",
        }
    }

    pub fn apply(self, profile: &Profile) -> ProfileView {
        project(profile, self.fields())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection: {0}")]
pub struct UnknownShape(pub String);

impl FromStr for ProfileShape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" | "details" | "full-details" => return Ok(Self::Full),
            "overview" => return Ok(Self::Summary),
            "availability" => return Ok(Self::LocationHours),
            "identity" => return Ok(Self::NameLocation),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

/// Derived boolean checks over a stored profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCheck {
    HasSkill,
    HasMultipleSkills,
    AvailableFor(u64),
    HasAvailableHours,
    HoursAbove(u64),
    LocationIs(String),
    LocationSet,
    Incomplete,
    Valid,
}

impl ProfileCheck {
    pub fn evaluate(&self, profile: &Profile) -> bool {
        match self {
            Self::HasSkill => has_skill(profile),
            Self::HasMultipleSkills => profile.skill_count() > 1,
            Self::AvailableFor(hours) => profile.hours_available >= *hours,
            Self::HasAvailableHours => profile.hours_available > 0,
            Self::HoursAbove(minimum) => profile.hours_available > *minimum,
            Self::LocationIs(location) => profile.location == *location,
            Self::LocationSet => !profile.location.is_empty(),
            Self::Incomplete => is_profile_incomplete(profile),
            Self::Valid => is_profile_valid(profile),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckParseError {
    #[error("unknown check: {0}")]
    Unknown(String),

    #[error("check `{check}` requires the `{param}` parameter")]
    MissingParameter {
        check: &'static str,
        param: &'static str,
    },
}

impl ProfileCheck {
    /// Resolves a check by name. Parameterized checks take `hours` or
    /// `location`; extra parameters are ignored.
    pub fn parse(
        name: &str,
        hours: Option<u64>,
        location: Option<String>,
    ) -> Result<Self, CheckParseError> {
        let need_hours = |check: &'static str| {
            hours.ok_or(CheckParseError::MissingParameter { check, param: "hours" })
        };

        let check = match name {
            "has-skill" | "has-any-skills" => Self::HasSkill,
            "has-multiple-skills" => Self::HasMultipleSkills,
            "available-for" | "hours-at-least" => Self::AvailableFor(need_hours("available-for")?),
            "has-available-hours" => Self::HasAvailableHours,
            "hours-above" => Self::HoursAbove(need_hours("hours-above")?),
            "location-is" => Self::LocationIs(location.ok_or(
                CheckParseError::MissingParameter {
                    check: "location-is",
                    param: "location",
                },
            )?),
            "location-set" => Self::LocationSet,
            "incomplete" => Self::Incomplete,
            "valid" => Self::Valid,
            other => return Err(CheckParseError::Unknown(other.to_string())),
        };
        Ok(check)
    }
}

fn has_skill(profile: &Profile) -> bool {
    !profile.skills.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Profile {
        Profile::new("Ann", "NYC", vec!["Python".to_string()], 5)
    }

    #[test]
    fn summary_carries_name_location_and_count() {
        let view = ProfileShape::Summary.apply(&ann());
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"name": "Ann", "location": "NYC", "skill_count": 1})
        );
    }

    #[test]
    fn full_shape_matches_stored_profile() {
        let view = ProfileShape::Full.apply(&ann());
        assert_eq!(view.name.as_deref(), Some("Ann"));
        assert_eq!(view.location.as_deref(), Some("NYC"));
        assert_eq!(view.skills, Some(vec!["Python".to_string()]));
        assert_eq!(view.hours_available, Some(5));
        assert_eq!(view.skill_count, None);
    }

    #[test]
    fn hours_skill_status_renders_status_text() {
        let mut profile = ann();
        profile.skills.clear();
        let view = ProfileShape::HoursSkillStatus.apply(&profile);
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"hours_available": 5, "skill_status": "Invalid Skills"})
        );
    }

    #[test]
    fn aliases_resolve_to_one_shape() {
        assert_eq!("overview".parse::<ProfileShape>().unwrap(), ProfileShape::Summary);
        assert_eq!("availability".parse::<ProfileShape>().unwrap(), ProfileShape::LocationHours);
        assert_eq!("location-hours".parse::<ProfileShape>().unwrap(), ProfileShape::LocationHours);
        assert_eq!("details".parse::<ProfileShape>().unwrap(), ProfileShape::Full);
        assert!("everything".parse::<ProfileShape>().is_err());
    }

    #[test]
    fn every_shape_round_trips_through_its_path_segment() {
        for shape in ProfileShape::ALL {
            assert_eq!(shape.as_str().parse::<ProfileShape>().unwrap(), shape);
        }
    }

    #[test]
    fn hour_checks_differ_at_the_boundary() {
        let profile = ann();
        assert!(ProfileCheck::AvailableFor(5).evaluate(&profile));
        assert!(!ProfileCheck::HoursAbove(5).evaluate(&profile));
        assert!(ProfileCheck::HoursAbove(4).evaluate(&profile));
        assert!(ProfileCheck::HasAvailableHours.evaluate(&profile));
    }

    #[test]
    fn skill_and_location_checks() {
        let mut profile = ann();
        assert!(ProfileCheck::HasSkill.evaluate(&profile));
        assert!(!ProfileCheck::HasMultipleSkills.evaluate(&profile));
        profile.skills.push("Go".to_string());
        assert!(ProfileCheck::HasMultipleSkills.evaluate(&profile));

        assert!(ProfileCheck::LocationIs("NYC".to_string()).evaluate(&profile));
        assert!(!ProfileCheck::LocationIs("nyc".to_string()).evaluate(&profile));
        assert!(ProfileCheck::LocationSet.evaluate(&profile));
    }

    #[test]
    fn parses_checks_with_parameters() {
        assert_eq!(
            ProfileCheck::parse("hours-at-least", Some(3), None).unwrap(),
            ProfileCheck::AvailableFor(3)
        );
        assert_eq!(
            ProfileCheck::parse("has-any-skills", None, None).unwrap(),
            ProfileCheck::HasSkill
        );
        assert_eq!(
            ProfileCheck::parse("location-is", None, Some("NYC".to_string())).unwrap(),
            ProfileCheck::LocationIs("NYC".to_string())
        );
        assert_eq!(
            ProfileCheck::parse("hours-above", None, None),
            Err(CheckParseError::MissingParameter {
                check: "hours-above",
                param: "hours"
            })
        );
        assert!(matches!(
            ProfileCheck::parse("is-famous", None, None),
            Err(CheckParseError::Unknown(_))
        ));
    }

    #[test]
    fn registration_status_text() {
        assert_eq!(
            serde_json::to_value(RegistrationStatus::from_registered(true)).unwrap(),
            "Registered"
        );
        assert_eq!(
            serde_json::to_value(RegistrationStatus::from_registered(false)).unwrap(),
            "Not Registered"
        );
        assert!(!RegistrationStatus::NotRegistered.is_registered());
    }
}
