use super::Claims;
use crate::domain::profiles::OwnerId;

/// Authenticated caller extracted from the bearer token
#[derive(Debug, Clone)]
pub struct CallerContext {
    /// Owner identity (from JWT sub claim); writes only ever touch this key
    pub owner: OwnerId,

    /// Email claim, when the issuer includes one
    pub email: Option<String>,

    pub role: Option<String>,
}

impl CallerContext {
    pub fn from_claims(claims: &Claims) -> Result<Self, &'static str> {
        let sub = claims.sub.trim();
        if sub.is_empty() {
            return Err("Token subject is empty");
        }

        Ok(Self {
            owner: OwnerId::new(sub),
            email: claims.email.clone(),
            role: claims.role.clone(),
        })
    }
}
