use chrono::Duration;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::Role;
use crate::jwt::TokenIssuer;
use crate::password::HashParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential coordinator combining password hashing and token issuance.
///
/// Built once from explicit settings and shared read-only afterwards.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Errors raised while building an [`Authenticator`].
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default hashing parameters and a 24 hour
    /// token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    ///
    /// # Errors
    /// * `JwtError` - Secret is empty
    pub fn new(jwt_secret: &[u8]) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret)?,
        })
    }

    /// Create an authenticator from explicit settings.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_lifetime` - Validity window of issued tokens
    /// * `hash_params` - Argon2id cost parameters
    ///
    /// # Errors
    /// * `JwtError` - Secret is empty
    /// * `PasswordError` - Hash parameters are invalid
    pub fn with_settings(
        jwt_secret: &[u8],
        token_lifetime: Duration,
        hash_params: HashParams,
    ) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_params(hash_params)?,
            token_issuer: TokenIssuer::with_lifetime(jwt_secret, token_lifetime)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Sign an access token for an account.
    pub fn issue_token(&self, account_id: impl ToString, role: Role) -> Result<String, JwtError> {
        self.token_issuer.issue(account_id, role)
    }

    /// Validate and decode an access token.
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.token_issuer.validate(token)
    }
}
