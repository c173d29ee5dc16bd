//! Domain types and DTOs
//!
//! Profile records, their validation rules and read projections.

pub mod profiles;
pub mod projection;
pub mod validation;

pub use profiles::*;
pub use projection::{
    CheckParseError, ProfileCheck, ProfileField, ProfileShape, ProfileView, RegistrationStatus,
    SkillStatus,
};
