//! Axum transport for the droplet identity and account core.
//!
//! Handlers are thin: they deserialize the request, parse domain values,
//! run the matching use case and shape the response. All decisions live in
//! `droplet_application`; this crate only speaks HTTP.

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorBody};
pub use state::AppState;
