//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::types::PhoneRegion;
use crate::pagination::PaginationConfig;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Cookie signing key material, at least 64 bytes.
    pub secret: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Region for phone numbers entered without a country code.
    #[serde(default)]
    pub phone_region: PhoneRegion,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Report an unknown identifier exactly like a wrong secret.
    #[serde(default)]
    pub conceal_unknown_identifiers: bool,
    #[serde(default)]
    pub hashing: HashingConfig,
}

/// Argon2id cost parameters used when storing new secrets.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

fn default_busy_timeout_secs() -> u64 {
    30
}
