pub mod config;
pub mod persistence;
pub mod security;

pub use config::DropletConfig;
pub use persistence::{
    InMemoryAccountStore, InMemoryUserStore, PostgresAccountStore, PostgresUserStore,
};
pub use security::{Argon2PasswordHasher, JwtTokenAuthority, SigningKeyError, SystemClock};
