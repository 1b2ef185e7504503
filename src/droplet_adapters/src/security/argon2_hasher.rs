//! Argon2id password hashing.
//!
//! The digest embeds algorithm, version, parameters and a fresh salt, so
//! verification needs no configuration beyond the digest itself. Hashing is
//! CPU-bound on purpose and runs on the blocking pool.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use droplet_core::{Password, PasswordDigest, PasswordHashError, PasswordHasher};

#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

fn argon2() -> Result<Argon2<'static>, PasswordHashError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError> {
        let password = password.clone();
        let current_span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(&mut rand_core::OsRng);
                let digest = argon2()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?
                    .to_string();
                Ok(PasswordDigest::new(digest))
            })
        })
        .await
        .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        digest: &PasswordDigest,
        password: &Password,
    ) -> Result<(), PasswordHashError> {
        let digest = digest.clone();
        let password = password.clone();
        let current_span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let parsed = PasswordHash::new(digest.expose_secret())
                    .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?;
                match argon2()?
                    .verify_password(password.expose_secret().as_bytes(), &parsed)
                {
                    Ok(()) => Ok(()),
                    Err(password_hash::Error::Password) => Err(PasswordHashError::Mismatch),
                    Err(e) => Err(PasswordHashError::Unexpected(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?
    }
}
