pub mod memory_account_store;
pub mod memory_user_store;
pub mod postgres_account_store;
pub mod postgres_user_store;

pub use memory_account_store::InMemoryAccountStore;
pub use memory_user_store::InMemoryUserStore;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_user_store::PostgresUserStore;
