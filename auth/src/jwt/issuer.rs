use chrono::Duration;
use chrono::Utc;

use super::claims::AccessClaims;
use super::claims::Role;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Lifetime of an access token unless configured otherwise.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Issues and validates bounded-lifetime access tokens.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret` and the default 24 hour lifetime.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_lifetime(secret, Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS))
    }

    /// Create an issuer with an explicit token lifetime.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn with_lifetime(secret: &[u8], lifetime: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
            lifetime,
        })
    }

    /// Sign a token for an account, expiring `lifetime` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, account_id: impl ToString, role: Role) -> Result<String, JwtError> {
        let claims = AccessClaims::new(account_id, role, Utc::now(), self.lifetime);
        self.handler.encode(&claims)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Token is malformed or signed with another key
    pub fn validate(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.handler.decode(token)
    }
}
