use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::Role;

/// Identity of a signed-in community member.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Claims decoded from a verified session token.
///
/// Constructed per request by a [`TokenVerifier`](crate::TokenVerifier) and
/// dropped once the guard has made its decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / principal identifier.
    pub sub: PrincipalId,

    /// Site role of the subject.
    pub role: Role,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Why a session token was rejected.
///
/// The guard never surfaces these to clients; every variant leads to the same
/// login redirect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenVerificationError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of session claims.
///
/// Signature checking happens in the verifier before this is called.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenVerificationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenVerificationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenVerificationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenVerificationError::Expired);
    }
    Ok(())
}
