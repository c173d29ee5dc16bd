//! Field and whole-record validation
//!
//! Field validators check one field against its bounds. `validate_profile`
//! is the whole-record predicate used by `register` and `update`; field
//! mutators only run the validator of the field they touch.

use super::profiles::{Profile, MAX_LOCATION_LEN, MAX_NAME_LEN, MAX_SKILLS, MAX_SKILL_LEN};
use crate::error::{HoursViolation, SkillsViolation, StoreError, StoreResult, TextViolation};

fn check_text(value: &str, max: usize) -> Result<(), TextViolation> {
    if value.is_empty() {
        return Err(TextViolation::Empty);
    }
    if value.chars().count() > max {
        return Err(TextViolation::TooLong { max });
    }
    Ok(())
}

pub fn validate_name(name: &str) -> StoreResult<()> {
    check_text(name, MAX_NAME_LEN).map_err(StoreError::InvalidName)
}

pub fn validate_location(location: &str) -> StoreResult<()> {
    check_text(location, MAX_LOCATION_LEN).map_err(StoreError::InvalidLocation)
}

/// Length bound of one skill; emptiness is not checked here
pub fn validate_skill(skill: &str) -> StoreResult<()> {
    if skill.chars().count() > MAX_SKILL_LEN {
        return Err(StoreError::InvalidSkills(SkillsViolation::SkillTooLong {
            max: MAX_SKILL_LEN,
        }));
    }
    Ok(())
}

pub fn validate_skills(skills: &[String]) -> StoreResult<()> {
    if skills.is_empty() {
        return Err(StoreError::InvalidSkills(SkillsViolation::Empty));
    }
    if skills.len() > MAX_SKILLS {
        return Err(StoreError::InvalidSkills(SkillsViolation::TooMany { max: MAX_SKILLS }));
    }
    skills.iter().try_for_each(|s| validate_skill(s))
}

pub fn validate_hours(hours: u64) -> StoreResult<()> {
    if hours < 1 {
        return Err(StoreError::InvalidHours(HoursViolation::BelowMinimum));
    }
    Ok(())
}

/// Checks all four fields, in declaration order
pub fn validate_profile(profile: &Profile) -> StoreResult<()> {
    validate_name(&profile.name)?;
    validate_location(&profile.location)?;
    validate_skills(&profile.skills)?;
    validate_hours(profile.hours_available)
}

/// Diagnostic form of the whole-record rule, without the length bounds
pub fn is_profile_valid(profile: &Profile) -> bool {
    !profile.name.is_empty()
        && !profile.location.is_empty()
        && !profile.skills.is_empty()
        && profile.hours_available > 0
}

/// Hours are deliberately not part of this check
pub fn is_profile_incomplete(profile: &Profile) -> bool {
    profile.name.is_empty() || profile.location.is_empty() || profile.skills.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_well_formed_profile() {
        let profile = Profile::new("Ann", "NYC", skills(&["Python"]), 5);
        assert!(validate_profile(&profile).is_ok());
        assert!(is_profile_valid(&profile));
        assert!(!is_profile_incomplete(&profile));
    }

    #[test]
    fn reports_first_failing_field() {
        let profile = Profile::new("", "", Vec::new(), 0);
        assert!(matches!(
            validate_profile(&profile),
            Err(StoreError::InvalidName(TextViolation::Empty))
        ));

        let profile = Profile::new("Ann", "NYC", skills(&["Go"]), 0);
        assert!(matches!(
            validate_profile(&profile),
            Err(StoreError::InvalidHours(HoursViolation::BelowMinimum))
        ));
    }

    #[test]
    fn enforces_text_bounds_in_characters() {
        assert!(validate_name(&"é".repeat(MAX_NAME_LEN)).is_ok());
        assert!(matches!(
            validate_name(&"a".repeat(MAX_NAME_LEN + 1)),
            Err(StoreError::InvalidName(TextViolation::TooLong { max: 100 }))
        ));
        assert!(matches!(
            validate_location(""),
            Err(StoreError::InvalidLocation(TextViolation::Empty))
        ));
    }

    #[test]
    fn enforces_skill_bounds() {
        assert!(matches!(
            validate_skills(&[]),
            Err(StoreError::InvalidSkills(SkillsViolation::Empty))
        ));

        let eleven: Vec<String> = (0..11).map(|i| format!("skill-{i}")).collect();
        assert!(matches!(
            validate_skills(&eleven),
            Err(StoreError::InvalidSkills(SkillsViolation::TooMany { max: 10 }))
        ));

        let long = vec!["x".repeat(MAX_SKILL_LEN + 1)];
        assert!(matches!(
            validate_skills(&long),
            Err(StoreError::InvalidSkills(SkillsViolation::SkillTooLong { max: 50 }))
        ));

        // Empty skill text is only a length question
        assert!(validate_skill("").is_ok());
    }

    #[test]
    fn incomplete_and_valid_disagree_only_on_hours() {
        let profile = Profile::new("", "L", Vec::new(), 5);
        assert!(is_profile_incomplete(&profile));
        assert!(!is_profile_valid(&profile));

        let no_hours = Profile::new("Ann", "NYC", skills(&["Go"]), 0);
        assert!(!is_profile_incomplete(&no_hours));
        assert!(!is_profile_valid(&no_hours));
    }
}
