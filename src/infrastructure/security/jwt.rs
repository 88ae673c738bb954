//! JWT access tokens.
//!
//! HS256 tokens carrying the user id, email and nickname. Verification
//! checks signature, issuer, audience and expiry and hands back the raw
//! claim set; turning it into a principal is the identity resolver's job.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{ClaimSet, TokenIssuer, User};
use crate::shared::error::AppError;

/// Claims written into issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject (user ID)
    sub: String,
    email: String,
    nickname: String,
    iss: String,
    aud: String,
    /// Issued at time (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
}

/// Issues and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    settings: JwtSettings,
}

impl JwtService {
    pub fn new(settings: JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            settings,
        }
    }

    /// Verify a bearer token and return its claims.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, AppError> {
        let data = decode::<ClaimSet>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token expired".into())
                }
                _ => AppError::Unauthorized("Invalid token".into()),
            },
        )?;

        Ok(data.claims)
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            nickname: user.nick_name.clone(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.settings.expiry_minutes)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }
}
