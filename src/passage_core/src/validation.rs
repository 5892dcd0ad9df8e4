//! Stateless field checks run before any collaborator is touched.

use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::{Email, EmailError},
    login_input::LoginKind,
    password::{Password, PasswordError},
    username::{MIN_USERNAME_LENGTH, Username, UsernameError},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Username(#[from] UsernameError),
    #[error("{0}")]
    Email(#[from] EmailError),
    #[error("{0}")]
    Password(#[from] PasswordError),
    #[error("Login must be at least 3 characters")]
    LoginTooShort,
}

/// Registration fields that passed validation.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: Username,
    pub email: Email,
    pub password: Password,
}

/// Login fields that passed validation, with the lookup column resolved.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub kind: LoginKind,
    pub identifier: String,
    pub password: Password,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn check_register(
        username: &str,
        email: &str,
        password: Secret<String>,
    ) -> Result<RegisterInput, ValidationError> {
        let username = Username::parse(username);
        let email = Email::parse(email);
        let password = Password::parse(password);

        Ok(RegisterInput {
            username: username?,
            email: email?,
            password: password?,
        })
    }

    /// Length checks only: the identifier may be a username or an email.
    pub fn check_login(input: &str, password: Secret<String>) -> Result<LoginInput, ValidationError> {
        if input.chars().count() < MIN_USERNAME_LENGTH {
            return Err(ValidationError::LoginTooShort);
        }
        let password = Password::parse(password)?;

        Ok(LoginInput {
            kind: Self::classify_login_input(input),
            identifier: input.to_owned(),
            password,
        })
    }

    pub fn classify_login_input(input: &str) -> LoginKind {
        if Email::is_well_formed(input) {
            LoginKind::Email
        } else {
            LoginKind::Username
        }
    }

    pub fn check_email(email: &str) -> Result<Email, ValidationError> {
        Ok(Email::parse(email)?)
    }

    pub fn check_password(password: Secret<String>) -> Result<Password, ValidationError> {
        Ok(Password::parse(password)?)
    }
}
