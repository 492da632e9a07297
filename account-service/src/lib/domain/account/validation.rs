//! Field checks for incoming account data.
//!
//! Account creation reports every failing rule so the caller can show them
//! all at once. Login and password change collapse to a single opaque error;
//! the login one in particular must not reveal which field was wrong.

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::ValidationError;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Credentials;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const PASSWORD_MIN_LENGTH: usize = 4;

/// Check a creation request against every rule.
///
/// Required and minimum-length checks run independently, so an empty field
/// yields two errors.
pub fn validate_account_creation(command: &CreateAccountCommand) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if command.username.is_empty() {
        errors.push(ValidationError::new("username", "username is required"));
    }

    if char_count(&command.username) < USERNAME_MIN_LENGTH {
        errors.push(ValidationError::new(
            "username",
            format!("username must be at least {USERNAME_MIN_LENGTH} characters long"),
        ));
    }

    if command.password.is_empty() {
        errors.push(ValidationError::new("password", "password is required"));
    }

    if char_count(&command.password) < PASSWORD_MIN_LENGTH {
        errors.push(ValidationError::new(
            "password",
            format!("password must be at least {PASSWORD_MIN_LENGTH} characters long"),
        ));
    }

    errors
}

/// Gate login input before any store lookup.
///
/// # Errors
/// * `InvalidCredentials` - Either field is empty or too short
pub fn validate_credentials(credentials: &Credentials) -> Result<(), AccountError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(AccountError::InvalidCredentials);
    }

    if char_count(&credentials.username) < USERNAME_MIN_LENGTH
        || char_count(&credentials.password) < PASSWORD_MIN_LENGTH
    {
        return Err(AccountError::InvalidCredentials);
    }

    Ok(())
}

/// Check a replacement password.
///
/// # Errors
/// * `InvalidPassword` - Password is empty or too short
pub fn validate_new_password(command: &ChangePasswordCommand) -> Result<(), AccountError> {
    if command.password.is_empty() || char_count(&command.password) < PASSWORD_MIN_LENGTH {
        return Err(AccountError::InvalidPassword);
    }

    Ok(())
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}
