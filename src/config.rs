use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Where the profile tables live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // Storage
    pub storage: StorageBackend,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // JWT auth
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        // Storage
        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "memory".to_string());
        let storage = match backend.to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "postgres" | "postgresql" => {
                let database_url = lookup("DATABASE_URL")
                    .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?;
                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10);
                StorageBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            other => bail!("Unknown STORE_BACKEND: {other}"),
        };

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // JWT auth
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        let jwt_issuer = lookup("JWT_ISSUER").filter(|s| !s.is_empty());
        let jwt_audience = lookup("JWT_AUDIENCE").unwrap_or_else(|| "authenticated".to_string());

        Ok(Settings {
            env,
            server_addr,
            storage,
            cors_allow_origins,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
        })
    }
}
