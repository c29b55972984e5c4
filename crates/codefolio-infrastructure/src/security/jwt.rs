use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use codefolio_domain::shared::{DomainError, UserId};

pub const INVALID_TOKEN: &str = "Invalid token";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    user: String,
    iat: i64,
    exp: i64,
    nonce: String,
}

/// HS256 tokens binding a user id. Used for session tokens and, with a
/// separate secret, for the GitHub OAuth `state`.
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Infrastructure(
                "JWT secret must not be empty".to_string(),
            ));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn issue(&self, user_id: &UserId) -> Result<String, DomainError> {
        let now = Utc::now();
        let mut nonce = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut nonce);

        let claims = Claims {
            user: user_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            nonce: hex::encode(nonce),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::Infrastructure(format!("Failed to sign token: {}", e)))
    }

    /// User id carried by a valid, unexpired token
    pub fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| UserId::from_string(&data.claims.user))
            .map_err(|_| DomainError::InvalidToken(INVALID_TOKEN.to_string()))
    }
}
