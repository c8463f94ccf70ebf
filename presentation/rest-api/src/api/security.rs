use jsonwebtoken::decode;
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::{Deserialize, Serialize};

use business::domain::shared::value_objects::{Caller, Role};

use crate::config::auth_config::AuthConfig;

/// Claims carried by the bearer tokens. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: u64,
}

pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Caller, String> {
    let data = decode::<Claims>(token, &config.decoding_key, &config.validation)
        .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    if data.claims.sub.trim().is_empty() {
        return Err("auth.missing_subject".to_string());
    }
    Ok(Caller::new(data.claims.sub, data.claims.role))
}

/// JWT Bearer authentication. Resolves to the verified caller.
#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT", checker = "jwt_bearer_checker")]
pub struct JwtBearer(pub Caller);

async fn jwt_bearer_checker(req: &Request, bearer: poem_openapi::auth::Bearer) -> Option<Caller> {
    let Some(config) = req.data::<AuthConfig>() else {
        tracing::error!("Auth configuration missing from request data");
        return None;
    };

    match verify_token(&bearer.token, config) {
        Ok(caller) => Some(caller),
        Err(e) => {
            tracing::warn!("Bearer auth failed: {e}");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_tokens::*;
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::from_secret(SECRET)
    }

    #[test]
    fn should_accept_valid_token() {
        let caller = verify_token(&valid_token("user-1", Role::Admin), &config()).unwrap();

        assert_eq!(caller.user_id.as_str(), "user-1");
        assert!(caller.is_admin());
    }

    #[test]
    fn should_reject_malformed_token() {
        let result = verify_token("not-a-jwt", &config());

        assert!(result.unwrap_err().contains("auth.token_validation_failed"));
    }

    #[test]
    fn should_reject_expired_token() {
        let token = token_for("user-1", Role::Customer, 1_000);

        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn should_reject_token_signed_with_other_secret() {
        let token = valid_token("user-1", Role::Customer);

        assert!(verify_token(&token, &AuthConfig::from_secret(b"other-secret")).is_err());
    }

    #[test]
    fn should_reject_unknown_role() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let claims = serde_json::json!({
            "sub": "user-1",
            "role": "superuser",
            "exp": chrono::Utc::now().timestamp() + 3600,
        });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn should_reject_blank_subject() {
        let token = valid_token("  ", Role::Customer);

        assert_eq!(verify_token(&token, &config()).unwrap_err(), "auth.missing_subject");
    }
}
