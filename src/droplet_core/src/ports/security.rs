//! Security ports: password hashing, the bearer-token authority, and the
//! clock the authority stamps claims with.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::password::{Password, PasswordDigest};

/// Wall-clock source, injected so tests can shift time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// The plaintext does not match the digest. Expected; callers map it to
    /// `wrong_password`.
    #[error("password mismatch")]
    Mismatch,
    #[error("unexpected hashing error: {0}")]
    Unexpected(String),
}

/// One-way hashing of secrets. Hashing salts freshly on every call;
/// verification is deterministic.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    async fn verify(
        &self,
        digest: &PasswordDigest,
        password: &Password,
    ) -> Result<(), PasswordHashError>;
}

/// The identity a verified token asserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPrincipal {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, expiry, not-before or claim-presence check failed. The
    /// parse cause is logged by the authority, not carried here.
    #[error("invalid token")]
    Invalid,
    #[error("unexpected token error: {0}")]
    Unexpected(String),
}

/// Mints and verifies signed bearer tokens. In-memory work only; safe to
/// share across concurrent callers.
pub trait TokenAuthority: Send + Sync {
    fn mint(&self, user_id: Uuid, username: &str) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<TokenPrincipal, TokenError>;
}
