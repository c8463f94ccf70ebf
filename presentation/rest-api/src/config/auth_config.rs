use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use super::app_config::ConfigError;

/// Verification settings for the HS256 bearer tokens issued by the auth service.
#[derive(Clone)]
pub struct AuthConfig {
    pub decoding_key: DecodingKey,
    pub validation: Validation,
}

impl AuthConfig {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Environment variables:
    /// - JWT_SECRET: shared HS256 secret (required, non-empty)
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = get("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        Ok(Self::from_secret(secret.as_bytes()))
    }
}
