use crate::config::Config;
use crate::errors::ApiError;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use futures_util::future::{Ready, err, ok};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: usize,
}

pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|_| ApiError::Internal)?
        .to_string())
}

pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

pub fn create_access_token(user_id: &str, cfg: &Config) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_bytes()),
    )
    .map_err(|_| ApiError::Internal)
}

pub fn verify_access_token(token: &str, cfg: &Config) -> Result<Claims, ApiError> {
    let mut v = Validation::new(Algorithm::HS256);
    v.validate_exp = true;
    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(cfg.jwt_secret_bytes()), &v)
        .map(|data| data.claims)
        .map_err(|_| ApiError::Unauthorized)
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cfg = req.app_data::<actix_web::web::Data<Config>>().unwrap();
        if let Some(h) = req.headers().get("Authorization") {
            if let Ok(s) = h.to_str() {
                // Clients send either the bare token or a Bearer-prefixed one.
                let token = s.strip_prefix("Bearer ").unwrap_or(s);
                if let Ok(claims) = verify_access_token(token, cfg) {
                    return ok(AuthUser {
                        user_id: claims.sub,
                    });
                }
            }
        }
        err(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            jwt_secret: Some("unit-test-secret".into()),
            ..Config::default()
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("hunter22hunter22").unwrap();
        assert!(verify_password(&hash, "hunter22hunter22"));
        assert!(!verify_password(&hash, "wrong password"));
        assert!(!verify_password("not a phc string", "hunter22hunter22"));
    }

    #[test]
    fn token_roundtrip() {
        let cfg = test_config();
        let token = create_access_token("user-123", &cfg).unwrap();
        let claims = verify_access_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn garbage_token_rejected() {
        let cfg = test_config();
        assert!(matches!(
            verify_access_token("not.a.jwt", &cfg),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_rejected() {
        let cfg = test_config();
        let other = Config {
            jwt_secret: Some("another-secret".into()),
            ..Config::default()
        };
        let token = create_access_token("user-123", &other).unwrap();
        assert!(verify_access_token(&token, &cfg).is_err());
    }
}
