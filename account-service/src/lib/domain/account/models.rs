use std::fmt;

use auth::Role;

use crate::domain::account::errors::AccountIdError;

/// Reserved username of the bootstrap administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Initial password of the bootstrap administrator.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Account entity.
///
/// `password_hash` always holds a PHC hash string, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl Account {
    /// Build an account that has not been persisted yet.
    pub fn new(username: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: AccountId::UNASSIGNED,
            username,
            password_hash,
            is_admin,
        }
    }

    pub fn role(&self) -> Role {
        Role::from_admin_flag(self.is_admin)
    }
}

/// Store-assigned account identifier.
///
/// Zero means the account has not been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub const UNASSIGNED: AccountId = AccountId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }

    /// Parse an account ID from its string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(AccountId(id)),
            Ok(id) => Err(AccountIdError::InvalidFormat(id.to_string())),
            Err(e) => Err(AccountIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub username: String,
    /// Plain text password (hashed by the service)
    pub password: String,
    pub is_admin: bool,
}

impl CreateAccountCommand {
    pub fn new(username: String, password: String, is_admin: bool) -> Self {
        Self {
            username,
            password,
            is_admin,
        }
    }
}

/// Login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Input for replacing an account's password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub password: String,
}

impl ChangePasswordCommand {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

/// Outcome of the default administrator bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAdmin {
    Created(AccountId),
    AlreadyPresent(AccountId),
}
