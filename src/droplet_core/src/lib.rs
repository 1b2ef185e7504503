pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{
        Account, AccountDevice, AccountDraft, AccountSettings, AccountUpdate, DeviceDraft,
        DeviceUpsert, SettingsDraft, SettingsUpdate,
    },
    email::{Email, EmailParseError},
    password::{Password, PasswordDigest, PasswordParseError},
    user::{NewUser, User},
};

pub use error::{AppError, ErrorCode};

pub use ports::{
    security::{
        Clock, PasswordHashError, PasswordHasher, TokenAuthority, TokenError, TokenPrincipal,
    },
    stores::{
        AccountStore, AccountStoreError, GetAccountFilter, GetUserFilter, UserStore,
        UserStoreError,
    },
};
