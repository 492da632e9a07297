use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::ValidationError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::DefaultAdmin;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Check a creation request and report every failing rule.
    ///
    /// Callers run this before `create_account`, which does not validate.
    fn validate_account_creation(&self, command: &CreateAccountCommand) -> Vec<ValidationError>;

    /// Create a new account with a hashed password.
    ///
    /// # Errors
    /// * `DuplicateKey` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// Resolve credentials to an account.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Input is malformed, the username is unknown or the password is wrong
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(&self, credentials: &Credentials) -> Result<Account, AccountError>;

    /// Authenticate and sign an access token carrying the account's role.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Authentication failed
    /// * `Token` - Signing failed
    /// * `DatabaseError` - Store operation failed
    async fn issue_access_token(&self, credentials: &Credentials) -> Result<String, AccountError>;

    /// Replace an account's password.
    ///
    /// # Errors
    /// * `InvalidPassword` - New password is empty or too short
    /// * `RecordNotFound` - Account does not exist
    /// * `PasswordUnchanged` - New password matches the current one
    /// * `DatabaseError` - Store operation failed
    async fn change_password(
        &self,
        id: AccountId,
        command: ChangePasswordCommand,
    ) -> Result<(), AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `RecordNotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: AccountId) -> Result<Account, AccountError>;

    /// Create the default administrator unless it already exists.
    ///
    /// Idempotent. Every error is returned; the process entry point decides
    /// whether to halt.
    async fn ensure_default_admin(&self) -> Result<DefaultAdmin, AccountError>;
}

/// Persistence operations for accounts.
///
/// Lookups report absence as `RecordNotFound` rather than an empty result.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Check whether an account with this username exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;

    /// Persist a new account and return it with its assigned identifier.
    ///
    /// # Errors
    /// * `DuplicateKey` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by username.
    ///
    /// # Errors
    /// * `RecordNotFound` - No account with this username
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `RecordNotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `RecordNotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError>;
}
