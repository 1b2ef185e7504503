use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// A plaintext password supplied by a caller.
///
/// Wrapped in [`Secret`] so it never appears in `Debug` output or logs.
/// The core accepts any non-empty value; password policy belongs to the
/// product surface, not the credential lifecycle.
#[derive(Clone)]
pub struct Password(Secret<String>);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("password must not be empty")]
pub struct PasswordParseError;

impl Password {
    pub fn parse(value: Secret<String>) -> Result<Self, PasswordParseError> {
        if value.expose_secret().is_empty() {
            return Err(PasswordParseError);
        }
        Ok(Password(value))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordParseError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Password::parse(value)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// An opaque one-way digest of a password.
///
/// The digest embeds algorithm, cost and salt. It is the only credential
/// material the core ever persists, and it is still kept out of logs.
#[derive(Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn new(digest: String) -> Self {
        PasswordDigest(Secret::from(digest))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}
