//! Bearer-token minting and verification.
//!
//! Tokens are `"<user-uuid>.<expiry-unix>.<signature>"` where the signature
//! is the hex SHA-256 of the server-side secret and the payload. Verification
//! is stateless: recompute the signature and check the expiry. This is thin
//! glue around the API surface, not a general-purpose credential system.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::domain::{Error, UserId};

/// Mints and verifies signed bearer tokens against a server-side secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    /// Create a signer with the given secret and token lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Mint a token for `user` expiring `ttl` from `now`.
    pub fn mint_at(&self, user: &UserId, now: DateTime<Utc>) -> String {
        let payload = format!("{user}.{}", (now + self.ttl).timestamp());
        let signature = self.sign(&payload);
        format!("{payload}.{signature}")
    }

    /// Mint a token for `user` expiring `ttl` from the current time.
    pub fn mint(&self, user: &UserId) -> String {
        self.mint_at(user, Utc::now())
    }

    /// Verify a token at `now`, returning the embedded user id.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, Error> {
        let invalid = || Error::unauthorized("invalid token");
        let mut parts = token.splitn(3, '.');
        let (Some(raw_id), Some(raw_expiry), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let payload = format!("{raw_id}.{raw_expiry}");
        if !constant_time_eq(self.sign(&payload).as_bytes(), signature.as_bytes()) {
            return Err(invalid());
        }
        let expiry = raw_expiry.parse::<i64>().map_err(|_| invalid())?;
        if expiry <= now.timestamp() {
            return Err(Error::unauthorized("token expired"));
        }
        UserId::from_str(raw_id).map_err(|_| invalid())
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<UserId, Error> {
        self.verify_at(token, Utc::now())
    }

    fn sign(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a candidate password against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    constant_time_eq(hash_password(password).as_bytes(), stored_hash.as_bytes())
}

// Length leaks, but both sides are fixed-size hex digests here.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret".to_vec(), Duration::hours(1))
    }

    #[test]
    fn minted_token_verifies() {
        let signer = signer();
        let user = UserId::random();
        let token = signer.mint(&user);
        assert_eq!(signer.verify(&token).expect("valid token"), user);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let signer = signer();
        let token = signer.mint(&UserId::random());
        let other = UserId::random();
        let mut parts = token.splitn(3, '.');
        let (_, expiry, signature) = (
            parts.next().expect("id"),
            parts.next().expect("expiry"),
            parts.next().expect("signature"),
        );
        let forged = format!("{other}.{expiry}.{signature}");
        assert!(signer.verify(&forged).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let user = UserId::random();
        let minted_at = Utc::now() - Duration::hours(2);
        let token = signer.mint_at(&user, minted_at);
        let err = signer.verify(&token).expect_err("expired");
        assert_eq!(err.message, "token expired");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = signer().mint(&UserId::random());
        let other = TokenSigner::new(b"other-secret".to_vec(), Duration::hours(1));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        for raw in ["", "abc", "a.b", "a.b.c", "not-a-uuid.123.deadbeef"] {
            assert!(signer().verify(raw).is_err(), "token: {raw:?}");
        }
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }
}
