pub mod account_service;
pub mod auth_service;
pub mod error;
pub mod token_issuer;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use error::{AccountError, AuthError};
pub use token_issuer::{TokenError, TokenIssuer, TokenLifetimes};
pub use use_cases::*;
