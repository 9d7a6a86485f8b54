//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take an [`Identity`] parameter to require authentication; the
//! extractor reads the `Authorization: Bearer` header and verifies the token
//! signature and expiry against the server-side [`TokenSigner`]. There is no
//! session store; the token alone carries the caller's identity.

use std::future::{ready, Ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::Duration;

use crate::domain::auth::TokenSigner;
use crate::domain::{Error, UserId};

/// Token signing state shared across workers.
#[derive(Clone)]
pub struct AuthState {
    signer: TokenSigner,
}

impl AuthState {
    /// Build auth state around a signing secret and token lifetime.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            signer: TokenSigner::new(secret, ttl),
        }
    }

    /// Mint a token for a freshly registered or logged-in user.
    pub fn issue_token(&self, user: &UserId) -> String {
        self.signer.mint(user)
    }

    fn verify(&self, token: &str) -> Result<UserId, Error> {
        self.signer.verify(token)
    }
}

/// The authenticated caller, extracted from the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(extract_identity(req))
    }
}

fn extract_identity(req: &HttpRequest) -> Result<Identity, Error> {
    let state = req
        .app_data::<web::Data<AuthState>>()
        .ok_or_else(|| Error::internal("auth state not configured"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("invalid authorization header"))?;
    let user_id = state.verify(token)?;
    Ok(Identity { user_id })
}
