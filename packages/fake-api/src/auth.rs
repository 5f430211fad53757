use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use common::role::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::FakeError;
use crate::state::User;

const JWT_SECRET: &[u8] = b"fake-api-secret";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uuid: String,
    pub role: Role,
    pub exp: i64,
    pub email: String,
}

/// Sign a token for a seeded user, valid for one day.
pub fn sign(user: &User) -> Result<String, FakeError> {
    let claims = Claims {
        sub: user.email.clone(),
        uuid: user.uuid.clone(),
        role: user.role,
        exp: (Utc::now() + Duration::days(1)).timestamp(),
        email: user.email.clone(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .map_err(|e| FakeError::Internal(e.to_string()))
}

fn verify(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Caller identified by the `Authorization: Bearer <token>` header.
pub struct AuthUser {
    pub uuid: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn require_staff(&self) -> Result<(), FakeError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(FakeError::PermissionDenied)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = FakeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(FakeError::TokenMissing)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(FakeError::TokenInvalid)?;
        let claims = verify(token).map_err(|_| FakeError::TokenInvalid)?;
        Ok(AuthUser {
            uuid: claims.uuid,
            email: claims.email,
            role: claims.role,
        })
    }
}
