use std::fmt;

use thiserror::Error;

/// Minimum username length, in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be at least 3 characters")]
    TooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let raw = raw.into();
        if raw.chars().count() < MIN_USERNAME_LENGTH {
            return Err(UsernameError::TooShort);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
