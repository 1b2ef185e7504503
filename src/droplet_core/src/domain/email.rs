use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A syntactically valid email address.
///
/// Validation is intentionally loose: one `@` with non-empty sides and no
/// whitespace. Deliverability is not this type's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid email address")]
pub struct EmailParseError;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"))
}

impl Email {
    pub fn parse(value: impl Into<String>) -> Result<Self, EmailParseError> {
        let value = value.into();
        if email_regex().is_match(&value) {
            Ok(Email(value))
        } else {
            Err(EmailParseError)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(Email::parse("a@x").is_ok());
        assert!(Email::parse("ann@example.com").is_ok());
        assert!(Email::parse("first.last+tag@sub.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("no-at-sign").is_err());
        assert!(Email::parse("@x").is_err());
        assert!(Email::parse("a@").is_err());
        assert!(Email::parse("a b@x").is_err());
        assert!(Email::parse("a@x@y").is_err());
    }
}
