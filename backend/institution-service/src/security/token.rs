//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs binding an institution id for a fixed
//! lifetime (3 days in the default deployment). The signing secret comes in
//! through the constructor — business logic never reads ambient environment.

use chrono::{Duration, Utc};
use error_types::{ApiError, ApiResult};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — institution id (UUID string).
    pub sub: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token bound to `institution_id`, expiring after the
    /// configured lifetime.
    pub fn issue(&self, institution_id: Uuid) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: institution_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| ApiError::Internal("Failed to generate token".to_string()))
    }

    /// Verify a presented token and return the institution id it binds.
    ///
    /// Missing, malformed, tampered, and expired tokens all surface as the
    /// same `Unauthorized` response; the distinction only goes to the logs.
    pub fn verify(&self, token: &str) -> ApiResult<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |err| {
                tracing::debug!(error = %err, "token verification failed");
                ApiError::Unauthorized("Authorization failed".to_string())
            },
        )?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| {
            tracing::debug!("token subject is not a valid institution id");
            ApiError::Unauthorized("Authorization failed".to_string())
        })
    }
}
