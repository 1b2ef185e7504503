use std::sync::Arc;

use droplet_core::{AccountStore, PasswordHasher, TokenAuthority, UserStore};
use tokio_util::sync::CancellationToken;

/// Shared handler state: the ports every use case is assembled from, plus
/// the token that aborts in-flight store work on shutdown.
pub struct AppState<U, S, H, T>
where
    U: UserStore,
    S: AccountStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    pub users: Arc<U>,
    pub accounts: Arc<S>,
    pub hasher: Arc<H>,
    pub tokens: Arc<T>,
    pub cancel: CancellationToken,
}

impl<U, S, H, T> AppState<U, S, H, T>
where
    U: UserStore,
    S: AccountStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    pub fn new(users: U, accounts: S, hasher: H, tokens: T) -> Self {
        Self {
            users: Arc::new(users),
            accounts: Arc::new(accounts),
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
            cancel: CancellationToken::new(),
        }
    }
}

// Derived Clone would bound every port on Clone; the Arcs make that
// unnecessary.
impl<U, S, H, T> Clone for AppState<U, S, H, T>
where
    U: UserStore,
    S: AccountStore,
    H: PasswordHasher,
    T: TokenAuthority,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            accounts: Arc::clone(&self.accounts),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            cancel: self.cancel.clone(),
        }
    }
}
