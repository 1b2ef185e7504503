//! Axum route handlers, one module per resource.

pub mod account;
pub mod auth;

pub use account::{create_account, get_account, update_account};
pub use auth::{sign_in, sign_up};
