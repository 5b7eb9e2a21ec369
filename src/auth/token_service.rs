use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{get_env, get_env_or, get_env_parse};
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub website_url: String,
    pub token_duration_min: i64,
    pub jwt_algorithm: Algorithm,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, website_url: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            website_url: website_url.into(),
            token_duration_min: 60,
            jwt_algorithm: Algorithm::HS256,
        }
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(
            get_env("JWT_SECRET")?,
            get_env_or("WEBSITE_URL", "http://localhost:8080"),
        );
        if let Some(minutes) = get_env_parse("TOKEN_DURATION_MIN")? {
            config.token_duration_min = minutes;
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (user_id)
    pub exp: usize,  // expiration time
    pub iat: usize,  // issued at
    pub nbf: usize,  // not before
    pub iss: String, // issuer
    pub aud: String, // audience
    pub jti: String, // jwt id
}

impl Claims {
    pub fn new(sub: String, config: &AuthConfig) -> Self {
        let iat = Utc::now();
        let exp = iat + Duration::minutes(config.token_duration_min);

        Self {
            sub,
            exp: exp.timestamp().max(0) as usize,
            iat: iat.timestamp() as usize,
            nbf: iat.timestamp() as usize,
            iss: config.website_url.to_string(),
            aud: config.website_url.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

pub struct TokenService;

impl TokenService {
    pub fn create_token(sub: String, config: &AuthConfig) -> Result<String> {
        let claims = Claims::new(sub, config);
        encode(
            &Header::new(config.jwt_algorithm),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::TokenCreationError(e.to_string()))
    }

    /// Checks signature, issuer, audience and expiry. Expired tokens map to
    /// `AuthFailTokenExpired`, anything else to `AuthFailTokenInvalid`.
    pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims> {
        let mut validation = Validation::new(config.jwt_algorithm);
        validation.set_audience(&[config.website_url.to_string()]);
        validation.set_issuer(&[config.website_url.to_string()]);

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &validation,
        )?;
        Ok(decoded.claims)
    }
}
