/**
 * Bearer Token Issue and Verification
 *
 * Mints and verifies the JWT bearer tokens that identify a principal.
 * The subject claim is the principal's UUID; every topic subscription
 * and ownership predicate downstream keys off that id. Identity
 * issuance (signup, login, password handling) lives outside this
 * service; tokens arrive already minted.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Token lifetime in seconds (30 days)
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Claims carried by a bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id as a UUID string
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn signing_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing JWT_SECRET, using development default: {}", err);
        "your-secret-key-change-in-production".to_string()
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Mint a signed bearer token for the given principal
pub fn create_token(user_id: uuid::Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = unix_now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: iat + TOKEN_TTL_SECS,
        iat,
    };

    let key = EncodingKey::from_secret(signing_secret().as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify a bearer token's signature and expiry, returning its claims
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(signing_secret().as_ref());
    let data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}
