use std::sync::Arc;

use droplet_core::{GetUserFilter, NewUser, User, UserStore, UserStoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// User store backed by process memory. Used by tests and local runs; the
/// semantics match the Postgres store, including the uniqueness conflict.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user(&self, filter: &GetUserFilter) -> Result<Option<User>, UserStoreError> {
        if filter.is_empty() {
            return Err(UserStoreError::Unexpected(
                "user filter has no selectors".to_string(),
            ));
        }
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| {
                filter.email.as_ref().is_none_or(|email| &user.email == email)
                    && filter.user_id.is_none_or(|id| user.id == id)
            })
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
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
