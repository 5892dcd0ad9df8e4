pub mod domain;
pub mod ports;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    amount::{Amount, AmountError},
    email::{Email, EmailError},
    login_input::LoginKind,
    password::{Password, PasswordError, PasswordHash},
    token::{AccessClaims, AccessToken, RefreshToken, TokenPair},
    user::{NewUser, User, UserId, UserIdError},
    username::{Username, UsernameError},
};

pub use ports::{
    repositories::{SessionStore, SessionStoreError, UserRepository, UserRepositoryError},
    services::{AccessTokenCodec, CredentialHasher, HasherError, TokenCodecError},
};

pub use validation::{LoginInput, RegisterInput, ValidationError, Validator};
