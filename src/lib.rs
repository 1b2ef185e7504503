//! # Droplet - Identity and Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the droplet service components.
//! Use this crate to get access to the full authentication and account stack in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! droplet = { path = "../droplet" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `Account`, etc.
//! - **Ports**: `UserStore`, `AccountStore`, `PasswordHasher`, `TokenAuthority`
//! - **Use cases**: `SignUpUseCase`, `SignInUseCase`, `CreateAccountUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `Argon2PasswordHasher`, `JwtTokenAuthority`, etc.
//! - **Service**: `DropletService` - The main entry point for the droplet API

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use droplet_core::*;
}

// Re-export most commonly used core types at the root level
pub use droplet_core::{
    Account, AccountDevice, AccountSettings, AppError, Email, ErrorCode, Password, TokenPrincipal,
    User,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use droplet_core::{
        AccountStore, AccountStoreError, Clock, GetAccountFilter, GetUserFilter, PasswordHashError,
        PasswordHasher, TokenAuthority, TokenError, UserStore, UserStoreError,
    };
}

// Re-export port traits at root level
pub use droplet_core::{AccountStore, PasswordHasher, TokenAuthority, UserStore};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use droplet_application::*;
}

// Re-export use cases at root level
pub use droplet_application::{
    CreateAccountUseCase, GetAccountUseCase, SignInUseCase, SignUpUseCase, UpdateAccountUseCase,
    VerifyTokenUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use droplet_adapters::persistence::*;
    }

    /// Password hashing, clock and token authority
    pub mod security {
        pub use droplet_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use droplet_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use droplet_adapters::{
    Argon2PasswordHasher, DropletConfig, InMemoryAccountStore, InMemoryUserStore,
    JwtTokenAuthority, PostgresAccountStore, PostgresUserStore, SystemClock,
};

// ============================================================================
// Transport and Service (Main Entry Point)
// ============================================================================

/// Axum transport layer
pub mod transport {
    pub use droplet_axum::*;
}

pub use droplet_axum::AppState;

/// Main droplet service
pub use droplet_service::DropletService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export the cancellation token threaded through every use case
pub use tokio_util::sync::CancellationToken;
