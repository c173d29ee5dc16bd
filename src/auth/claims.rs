use serde::{Deserialize, Serialize};

/// JWT claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the owner identity of the caller
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Issuer - optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp) - optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// User email - optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// User role - optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
