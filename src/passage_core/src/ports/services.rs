use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    password::{Password, PasswordHash},
    token::{AccessClaims, AccessToken},
};

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

/// Port trait for one-way password hashing
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError>;

    /// Constant-time check of `candidate` against `hash`. A hash that cannot be
    /// parsed verifies as `false`.
    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> bool;
}

#[derive(Debug, Error)]
pub enum TokenCodecError {
    #[error("Unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Port trait for signing and verifying access tokens
pub trait AccessTokenCodec: Send + Sync {
    fn encode(&self, claims: &AccessClaims) -> Result<AccessToken, TokenCodecError>;

    fn decode(&self, token: &str) -> Result<AccessClaims, TokenCodecError>;
}
