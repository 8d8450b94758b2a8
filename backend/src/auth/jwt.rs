//! Bearer token issuance and verification
//!
//! Tokens are HS256-signed JWTs carrying the account email as subject and a
//! fixed expiry window. Verification collapses every failure mode (bad
//! signature, expired, structurally malformed) into one opaque error so
//! callers cannot probe which check failed.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed signing keys, derived once at startup and shared via Arc
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuer/verifier
///
/// Create once at startup and store in `AppState`; cloning is cheap.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            expiry_secs,
        }
    }

    /// Issue a signed token for the given subject email
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a token and return its subject email
    ///
    /// Expiry is checked against the exact instant (no leeway).
    pub fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(|_| anyhow!("Invalid token"))?;

        Ok(token_data.claims.sub)
    }
}
