//! Session token verification capability.
//!
//! The guard only depends on [`TokenVerifier`]; [`Hs256JwtVerifier`] is the
//! deployment implementation and tests substitute their own.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};

use crate::{SessionClaims, TokenVerificationError, validate_claims};

/// Verifies an opaque session token and yields its claims.
///
/// Implementations may be asynchronous (remote introspection, key fetches);
/// the guard awaits exactly one call per protected request and does not retry.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError>;
}

/// HS256 JWT verifier backed by a shared secret.
pub struct Hs256JwtVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl Hs256JwtVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Time-window checks are done by `validate_claims` on our own fields.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims with this verifier's secret.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenVerificationError::InvalidSignature,
                _ => TokenVerificationError::Malformed(e.to_string()),
            })?;
        Ok(data.claims)
    }
}

impl core::fmt::Debug for Hs256JwtVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtVerifier").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenVerifier for Hs256JwtVerifier {
    async fn verify(&self, token: &str) -> Result<SessionClaims, TokenVerificationError> {
        let claims = self.decode(token)?;
        validate_claims(&claims, Utc::now())?;
        Ok(claims)
    }
}
