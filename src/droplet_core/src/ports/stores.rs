//! Persistence ports consumed by the core.
//!
//! Absence is a first-class result: lookups return `Ok(None)` when nothing
//! matches, never an error. Store errors are operational failures only,
//! plus the uniqueness conflict the sign-up race depends on.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account::{Account, AccountDraft, AccountUpdate},
    email::Email,
    user::{NewUser, User},
};

#[derive(Debug, Error)]
pub enum UserStoreError {
    /// Another user already holds this email. Surfaced by `create_user` when
    /// the store's uniqueness constraint resolves a sign-up race.
    #[error("email already taken")]
    EmailTaken,
    #[error("unexpected store error: {0}")]
    Unexpected(String),
}

/// Selectors for a user lookup. At least one must be set; set selectors are
/// ANDed together.
#[derive(Debug, Clone, Default)]
pub struct GetUserFilter {
    pub email: Option<Email>,
    pub user_id: Option<Uuid>,
}

impl GetUserFilter {
    pub fn by_email(email: Email) -> Self {
        GetUserFilter {
            email: Some(email),
            ..Default::default()
        }
    }

    pub fn by_id(user_id: Uuid) -> Self {
        GetUserFilter {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.user_id.is_none()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a single user matching every set selector.
    async fn get_user(&self, filter: &GetUserFilter) -> Result<Option<User>, UserStoreError>;

    /// Persists a new user, assigning its identifier.
    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError>;
}

#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("unexpected store error: {0}")]
    Unexpected(String),
}

/// Selectors for an account lookup. At least one must be set; set selectors
/// are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct GetAccountFilter {
    pub account_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl GetAccountFilter {
    pub fn by_id(account_id: Uuid) -> Self {
        GetAccountFilter {
            account_id: Some(account_id),
            ..Default::default()
        }
    }

    pub fn owned_by(account_id: Uuid, user_id: Uuid) -> Self {
        GetAccountFilter {
            account_id: Some(account_id),
            user_id: Some(user_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account_id.is_none() && self.user_id.is_none()
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists the full aggregate atomically, assigning every identifier.
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, AccountStoreError>;

    /// Loads the full aggregate (devices in persisted order, settings), or
    /// `None` when no account matches.
    async fn get_account(
        &self,
        filter: &GetAccountFilter,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Applies a change set: inserts devices without an id, updates the rest
    /// by id writing every listed field including default values, and upserts
    /// settings. Returns the reloaded aggregate, or `None` when the account
    /// id does not exist.
    async fn update_account(
        &self,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountStoreError>;
}
