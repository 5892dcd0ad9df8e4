//! # Passage - Account and Session Service Library
//!
//! Facade crate that re-exports the public APIs of the passage components.
//! Depend on this crate to get registration, login, refresh token rotation
//! and account management in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `Amount`, `User`, etc.
//! - **Port traits**: `UserRepository`, `SessionStore`, `CredentialHasher`, `AccessTokenCodec`
//! - **Application services**: `AuthService`, `AccountService` and their use cases
//! - **Adapters**: `PostgresUserRepository`, `RedisSessionStore`, `Argon2Hasher`, `JwtCodec`, etc.
//! - **Service**: `PassageServer` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use passage_core::*;
}

pub use passage_core::{
    AccessClaims, AccessToken, Amount, Email, LoginKind, Password, PasswordHash, RefreshToken,
    TokenPair, User, UserId, Username, ValidationError, Validator,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use passage_core::ports::*;
}

pub use passage_core::{
    AccessTokenCodec, CredentialHasher, SessionStore, SessionStoreError, UserRepository,
    UserRepositoryError,
};

// ============================================================================
// Application Layer
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use passage_application::use_cases::*;
}

pub use passage_application::{
    AccountError, AccountService, AuthError, AuthService, TokenIssuer, TokenLifetimes,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers and middleware
    pub mod http {
        pub use passage_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use passage_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use passage_adapters::config::*;
    }
}

pub use passage_adapters::{
    Argon2Hasher, HashMapSessionStore, HashMapUserRepository, JwtCodec, PostgresUserRepository,
    RedisSessionStore,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use passage_service::{PassageServer, configure_postgresql, configure_redis, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
