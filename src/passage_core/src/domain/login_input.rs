use std::fmt;

/// Which user column a login identifier is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginKind {
    Username,
    Email,
}

impl LoginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginKind::Username => "username",
            LoginKind::Email => "email",
        }
    }
}

impl fmt::Display for LoginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
