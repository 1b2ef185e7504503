//! In-memory fakes shared by the use-case tests.

use std::sync::Arc;

use droplet_core::{
    Account, AccountDraft, AccountStore, AccountStoreError, AccountUpdate, GetAccountFilter,
    GetUserFilter, NewUser, Password, PasswordDigest, PasswordHashError, PasswordHasher,
    TokenAuthority, TokenError, TokenPrincipal, User, UserStore, UserStoreError,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct FakeUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl FakeUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait::async_trait]
impl UserStore for FakeUserStore {
    async fn get_user(&self, filter: &GetUserFilter) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| {
                filter.email.as_ref().is_none_or(|e| &u.email == e)
                    && filter.user_id.is_none_or(|id| u.id == id)
            })
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_digest: user.password_digest,
            mac_address: user.mac_address,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[derive(Default, Clone)]
pub struct FakeAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl FakeAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for FakeAccountStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, AccountStoreError> {
        let id = Uuid::new_v4();
        let account = Account {
            id,
            user_id: draft.user_id,
            account_devices: draft
                .devices
                .into_iter()
                .map(|d| droplet_core::AccountDevice {
                    id: Uuid::new_v4(),
                    account_id: id,
                    name: d.name,
                    os: d.os,
                    mac_address: d.mac_address,
                    active: d.active,
                })
                .collect(),
            account_settings: draft.settings.map(|s| droplet_core::AccountSettings {
                id: Uuid::new_v4(),
                account_id: id,
                language: s.language,
            }),
        };
        self.accounts.write().await.push(account.clone());
        Ok(account)
    }

    async fn get_account(
        &self,
        filter: &GetAccountFilter,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| {
                filter.account_id.is_none_or(|id| a.id == id)
                    && filter.user_id.is_none_or(|id| a.user_id == id)
            })
            .cloned())
    }

    async fn update_account(
        &self,
        update: AccountUpdate,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.iter_mut().find(|a| a.id == update.id) else {
            return Ok(None);
        };
        account.user_id = update.user_id;
        for device in update.devices {
            match device.id {
                Some(id) => {
                    if let Some(existing) =
                        account.account_devices.iter_mut().find(|d| d.id == id)
                    {
                        existing.name = device.name;
                        existing.os = device.os;
                        existing.mac_address = device.mac_address;
                        existing.active = device.active;
                    }
                }
                None => account.account_devices.push(droplet_core::AccountDevice {
                    id: Uuid::new_v4(),
                    account_id: account.id,
                    name: device.name,
                    os: device.os,
                    mac_address: device.mac_address,
                    active: device.active,
                }),
            }
        }
        if let Some(settings) = update.settings {
            match &mut account.account_settings {
                Some(existing) => existing.language = settings.language,
                None => {
                    account.account_settings = Some(droplet_core::AccountSettings {
                        id: Uuid::new_v4(),
                        account_id: account.id,
                        language: settings.language,
                    })
                }
            }
        }
        Ok(Some(account.clone()))
    }
}

/// Transparent "hash" for tests; real hashing lives in the adapters.
#[derive(Default, Clone)]
pub struct FakeHasher;

#[async_trait::async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new(format!(
            "fake:{}",
            password.expose_secret()
        )))
    }

    async fn verify(
        &self,
        digest: &PasswordDigest,
        password: &Password,
    ) -> Result<(), PasswordHashError> {
        if digest.expose_secret() == format!("fake:{}", password.expose_secret()) {
            Ok(())
        } else {
            Err(PasswordHashError::Mismatch)
        }
    }
}

/// Token authority with a trivially parseable format.
#[derive(Default, Clone)]
pub struct FakeTokenAuthority;

impl TokenAuthority for FakeTokenAuthority {
    fn mint(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        Ok(format!("fake.{user_id}.{username}"))
    }

    fn verify(&self, token: &str) -> Result<TokenPrincipal, TokenError> {
        let mut parts = token.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("fake"), Some(id), Some(username)) => Ok(TokenPrincipal {
                user_id: Uuid::parse_str(id).map_err(|_| TokenError::Invalid)?,
                username: username.to_string(),
            }),
            _ => Err(TokenError::Invalid),
        }
    }
}

pub fn user_with_email(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: "ann".to_string(),
        email: droplet_core::Email::parse(email).unwrap(),
        password_digest: PasswordDigest::new("fake:p@ss".to_string()),
        mac_address: Some("aa:bb".to_string()),
    }
}
