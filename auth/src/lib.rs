//! Credential primitives for account services
//!
//! - Password hashing (Argon2id, self-salted PHC strings)
//! - Access token issuance and validation (HS256 JWT)
//! - An authenticator bundling both behind one injected configuration
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Role, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue(42, Role::Admin).unwrap();
//! let claims = issuer.validate(&token).unwrap();
//! assert_eq!(claims.id, "42");
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Role;
pub use jwt::TokenIssuer;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
