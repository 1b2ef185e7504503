//! Two-tier error taxonomy for the identity and account core.
//!
//! Expected failures carry a stable machine code and a human message and are
//! surfaced verbatim to callers. Everything else is wrapped with a short
//! context phrase and treated as an internal failure at the boundary.

use thiserror::Error;

/// Stable machine codes for anticipated business failures.
///
/// These codes are part of the wire contract; renaming a variant must not
/// change the string returned by [`ErrorCode::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserAlreadyCreated,
    UserNotFound,
    WrongPassword,
    AccountNotFound,
    InvalidToken,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UserAlreadyCreated => "user_already_created",
            ErrorCode::UserNotFound => "user_not_found",
            ErrorCode::WrongPassword => "wrong_password",
            ErrorCode::AccountNotFound => "account_not_found",
            ErrorCode::InvalidToken => "invalid_token",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::UserAlreadyCreated => "user already created",
            ErrorCode::UserNotFound => "user not found",
            ErrorCode::WrongPassword => "wrong password",
            ErrorCode::AccountNotFound => "account not found",
            ErrorCode::InvalidToken => "invalid token",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by every service operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Anticipated business failure, identified by code rather than type.
    #[error("{}", .0.message())]
    Business(ErrorCode),
    /// Anything else, wrapped with a one-line context phrase.
    #[error("{context}: {source}")]
    Unexpected {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl AppError {
    pub fn business(code: ErrorCode) -> Self {
        AppError::Business(code)
    }

    pub fn unexpected(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Unexpected {
            context: context.into(),
            source: source.into(),
        }
    }

    /// True for anticipated business failures.
    pub fn is_expected(&self) -> bool {
        matches!(self, AppError::Business(_))
    }

    /// The stable code of a business error, or `None` for unexpected failures.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AppError::Business(code) => Some(code.as_str()),
            AppError::Unexpected { .. } => None,
        }
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        AppError::Business(code)
    }
}
