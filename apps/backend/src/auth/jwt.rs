use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::claims::IdentityClaims;
use crate::state::security_config::SecurityConfig;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("malformed token")]
    Malformed,
    #[error("missing or mistyped claims")]
    InvalidClaims,
    #[error("signing secret unavailable")]
    SecretUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("failed to sign token: {detail}")]
    Signing { detail: String },
    #[error("failed to verify token: {0}")]
    Verification(VerificationFailure),
}

/// Wire form of a session token payload.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    id: i64,
    email: String,
    /// Issued-at (seconds since epoch)
    iat: i64,
    /// Expiry (seconds since epoch)
    exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Built once from [`SecurityConfig`] and shared through `AppState`. The
/// algorithm is pinned to the configured symmetric algorithm for both
/// directions; a token whose header names any other algorithm is rejected.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    ttl: Duration,
    secret_present: bool,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .field("secret_present", &self.secret_present)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            algorithm: security.algorithm,
            ttl: security.session_ttl,
            secret_present: !security.jwt_secret.is_empty(),
            encoding: EncodingKey::from_secret(&security.jwt_secret),
            decoding: DecodingKey::from_secret(&security.jwt_secret),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token carrying exactly `claims` plus `iat`/`exp` derived from `now`.
    pub fn issue(&self, claims: &IdentityClaims, now: SystemTime) -> Result<String, TokenError> {
        if !self.secret_present {
            return Err(TokenError::Signing {
                detail: "signing secret is empty".to_string(),
            });
        }

        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Signing {
                detail: "clock is before the unix epoch".to_string(),
            })?
            .as_secs() as i64;
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| TokenError::Signing {
                detail: "session ttl overflows the expiry timestamp".to_string(),
            })?;

        let payload = SessionClaims {
            id: claims.id,
            email: claims.email.clone(),
            iat,
            exp,
        };

        encode(&Header::new(self.algorithm), &payload, &self.encoding).map_err(|e| {
            TokenError::Signing {
                detail: e.to_string(),
            }
        })
    }

    /// Verify signature, algorithm, expiry and claim shape.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        if !self.secret_present {
            return Err(TokenError::Verification(
                VerificationFailure::SecretUnavailable,
            ));
        }

        // Validation::new pins the accepted algorithm list to exactly one entry
        // and requires `exp`.
        let validation = Validation::new(self.algorithm);

        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| IdentityClaims {
                id: data.claims.id,
                email: data.claims.email,
            })
            .map_err(|e| TokenError::Verification(classify(e.kind())))
    }
}

fn classify(kind: &ErrorKind) -> VerificationFailure {
    match kind {
        ErrorKind::ExpiredSignature => VerificationFailure::Expired,
        ErrorKind::InvalidSignature => VerificationFailure::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            VerificationFailure::UnexpectedAlgorithm
        }
        ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
            VerificationFailure::InvalidClaims
        }
        _ => VerificationFailure::Malformed,
    }
}
