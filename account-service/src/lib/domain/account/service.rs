use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::ValidationError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::DefaultAdmin;
use crate::domain::account::models::DEFAULT_ADMIN_PASSWORD;
use crate::domain::account::models::DEFAULT_ADMIN_USERNAME;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::validation;

/// Domain service implementation for account operations.
///
/// The username pre-check in `create_account` is not atomic with the insert;
/// two concurrent sign-ups for one username are settled by the store's own
/// uniqueness constraint, which surfaces as `DuplicateKey` as well.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    fn validate_account_creation(&self, command: &CreateAccountCommand) -> Vec<ValidationError> {
        validation::validate_account_creation(command)
    }

    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        if self
            .repository
            .exists_by_username(&command.username)
            .await?
        {
            return Err(AccountError::DuplicateKey(command.username));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let account = self
            .repository
            .create(Account::new(command.username, password_hash, command.is_admin))
            .await?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            is_admin = account.is_admin,
            "Account created"
        );

        Ok(account)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Account, AccountError> {
        validation::validate_credentials(credentials)?;

        let account = match self
            .repository
            .find_by_username(&credentials.username)
            .await
        {
            Ok(account) => account,
            Err(AccountError::RecordNotFound) => {
                tracing::debug!("Login attempt for unknown username");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !account.id.is_assigned() {
            return Err(AccountError::InvalidCredentials);
        }

        match self
            .authenticator
            .verify_password(&credentials.password, &account.password_hash)
        {
            Ok(true) => Ok(account),
            Ok(false) => Err(AccountError::InvalidCredentials),
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Stored password hash is unreadable"
                );
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    async fn issue_access_token(&self, credentials: &Credentials) -> Result<String, AccountError> {
        let account = self.authenticate(credentials).await?;

        let token = self.authenticator.issue_token(account.id, account.role())?;

        tracing::debug!(account_id = %account.id, role = %account.role(), "Access token issued");

        Ok(token)
    }

    async fn change_password(
        &self,
        id: AccountId,
        command: ChangePasswordCommand,
    ) -> Result<(), AccountError> {
        validation::validate_new_password(&command)?;

        let account = self.repository.find_by_id(id).await?;

        if !account.id.is_assigned() {
            return Err(AccountError::RecordNotFound);
        }

        if let Ok(true) = self
            .authenticator
            .verify_password(&command.password, &account.password_hash)
        {
            return Err(AccountError::PasswordUnchanged);
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        self.repository
            .update_password_hash(account.id, &password_hash)
            .await?;

        tracing::info!(account_id = %account.id, "Password changed");

        Ok(())
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, AccountError> {
        self.repository.find_by_id(id).await
    }

    async fn ensure_default_admin(&self) -> Result<DefaultAdmin, AccountError> {
        match self
            .repository
            .find_by_username(DEFAULT_ADMIN_USERNAME)
            .await
        {
            Ok(admin) if admin.id.is_assigned() => {
                tracing::info!(account_id = %admin.id, "Default admin already exists");
                return Ok(DefaultAdmin::AlreadyPresent(admin.id));
            }
            Ok(_) | Err(AccountError::RecordNotFound) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up default admin");
                return Err(e);
            }
        }

        let password_hash = self.authenticator.hash_password(DEFAULT_ADMIN_PASSWORD)?;

        let admin = self
            .repository
            .create(Account::new(
                DEFAULT_ADMIN_USERNAME.to_string(),
                password_hash,
                true,
            ))
            .await?;

        tracing::info!(account_id = %admin.id, "Default admin created");

        Ok(DefaultAdmin::Created(admin.id))
    }
}

#[cfg(test)]
mod tests {
    use auth::HashParams;
    use auth::Role;
    use chrono::Duration;
    use mockall::mock;

    use super::*;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_username(&self, username: &str) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError>;
            async fn update_password_hash(&self, id: AccountId, password_hash: &str) -> Result<(), AccountError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::with_settings(
                b"test-secret-key-for-jwt-signing-at-least-32-bytes",
                Duration::hours(24),
                HashParams {
                    memory_kib: 8,
                    iterations: 1,
                    parallelism: 1,
                },
            )
            .expect("Failed to build authenticator"),
        )
    }

    fn stored_account(id: i64, username: &str, password: &str, is_admin: bool) -> Account {
        Account {
            id: AccountId(id),
            username: username.to_string(),
            password_hash: authenticator().hash_password(password).unwrap(),
            is_admin,
        }
    }

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        AccountService::new(Arc::new(repository), authenticator())
    }

    #[tokio::test]
    async fn test_create_account_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_exists_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(false));

        repository
            .expect_create()
            .withf(|account| {
                account.username == "alice"
                    && !account.id.is_assigned()
                    && account.password_hash.starts_with("$argon2id$")
                    && account.password_hash != "secret"
                    && !account.is_admin
            })
            .times(1)
            .returning(|account| Ok(Account { id: AccountId(1), ..account }));

        let command = CreateAccountCommand::new("alice".to_string(), "secret".to_string(), false);
        let account = service(repository)
            .create_account(command)
            .await
            .expect("Failed to create account");

        assert_eq!(account.id, AccountId(1));
        assert_eq!(account.username, "alice");
    }

    #[tokio::test]
    async fn test_create_account_duplicate_username() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));
        repository.expect_create().times(0);

        let command = CreateAccountCommand::new("alice".to_string(), "secret".to_string(), false);
        let result = service(repository).create_account(command).await;

        assert!(matches!(result, Err(AccountError::DuplicateKey(name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_create_account_check_error_takes_priority() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));
        repository.expect_create().times(0);

        let command = CreateAccountCommand::new("alice".to_string(), "secret".to_string(), false);
        let result = service(repository).create_account(command).await;

        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_create_account_store_rejects_duplicate() {
        let mut repository = MockTestAccountRepository::new();

        // Lost the race between pre-check and insert
        repository
            .expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .times(1)
            .returning(|account| Err(AccountError::DuplicateKey(account.username)));

        let command = CreateAccountCommand::new("alice".to_string(), "secret".to_string(), false);
        let result = service(repository).create_account(command).await;

        assert!(matches!(result, Err(AccountError::DuplicateKey(_))));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(7, "alice", "secret", false);

        repository
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(account.clone()));

        let result = service(repository)
            .authenticate(&Credentials::new("alice", "secret"))
            .await
            .expect("Authentication failed");

        assert_eq!(result.id, AccountId(7));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_input_skips_store() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_username().times(0);

        let result = service(repository)
            .authenticate(&Credentials::new("al", "secret"))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(7, "alice", "secret", false);

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(account.clone()));

        let result = service(repository)
            .authenticate(&Credentials::new("alice", "wrong"))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_username() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AccountError::RecordNotFound));

        let result = service(repository)
            .authenticate(&Credentials::new("nobody", "secret"))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unassigned_id() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(0, "alice", "secret", false);

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(account.clone()));

        let result = service(repository)
            .authenticate(&Credentials::new("alice", "secret"))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_propagates_store_failure() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("timeout".to_string())));

        let result = service(repository)
            .authenticate(&Credentials::new("alice", "secret"))
            .await;

        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_issue_access_token_roles() {
        for (is_admin, expected) in [(true, Role::Admin), (false, Role::User)] {
            let mut repository = MockTestAccountRepository::new();
            let account = stored_account(3, "carol", "secret", is_admin);

            repository
                .expect_find_by_username()
                .times(1)
                .returning(move |_| Ok(account.clone()));

            let service = service(repository);
            let token = service
                .issue_access_token(&Credentials::new("carol", "secret"))
                .await
                .expect("Failed to issue token");

            let claims = service.authenticator.validate_token(&token).unwrap();
            assert_eq!(claims.id, "3");
            assert_eq!(claims.role, expected);
        }
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(4, "dave", "old-password", false);

        repository
            .expect_find_by_id()
            .withf(|id| *id == AccountId(4))
            .times(1)
            .returning(move |_| Ok(account.clone()));

        repository
            .expect_update_password_hash()
            .withf(|id, hash| *id == AccountId(4) && hash.starts_with("$argon2id$"))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(repository)
            .change_password(AccountId(4), ChangePasswordCommand::new("new-password"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_unchanged() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(4, "dave", "same-password", false);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(account.clone()));
        repository.expect_update_password_hash().times(0);

        let result = service(repository)
            .change_password(AccountId(4), ChangePasswordCommand::new("same-password"))
            .await;

        assert!(matches!(result, Err(AccountError::PasswordUnchanged)));
    }

    #[tokio::test]
    async fn test_change_password_invalid() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);

        let result = service(repository)
            .change_password(AccountId(4), ChangePasswordCommand::new("abc"))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidPassword)));
    }

    #[tokio::test]
    async fn test_change_password_not_found() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(AccountError::RecordNotFound));

        let result = service(repository)
            .change_password(AccountId(99), ChangePasswordCommand::new("new-password"))
            .await;

        assert!(matches!(result, Err(AccountError::RecordNotFound)));
    }

    #[tokio::test]
    async fn test_change_password_unassigned_id() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(0, "dave", "old-password", false);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(account.clone()));
        repository.expect_update_password_hash().times(0);

        let result = service(repository)
            .change_password(AccountId(4), ChangePasswordCommand::new("new-password"))
            .await;

        assert!(matches!(result, Err(AccountError::RecordNotFound)));
    }

    #[tokio::test]
    async fn test_get_account_passthrough() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(5, "erin", "secret", true);

        repository
            .expect_find_by_id()
            .withf(|id| *id == AccountId(5))
            .times(1)
            .returning(move |_| Ok(account.clone()));

        let result = service(repository).get_account(AccountId(5)).await.unwrap();
        assert_eq!(result.username, "erin");
        assert!(result.is_admin);
    }

    #[tokio::test]
    async fn test_ensure_default_admin_creates() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .withf(|username| username == "admin")
            .times(1)
            .returning(|_| Err(AccountError::RecordNotFound));

        repository
            .expect_create()
            .withf(|account| account.username == "admin" && account.is_admin)
            .times(1)
            .returning(|account| Ok(Account { id: AccountId(1), ..account }));

        let result = service(repository).ensure_default_admin().await;
        assert!(matches!(result, Ok(DefaultAdmin::Created(AccountId(1)))));
    }

    #[tokio::test]
    async fn test_ensure_default_admin_existing() {
        let mut repository = MockTestAccountRepository::new();
        let admin = stored_account(1, "admin", "admin", true);

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(admin.clone()));
        repository.expect_create().times(0);

        let result = service(repository).ensure_default_admin().await;
        assert!(matches!(result, Ok(DefaultAdmin::AlreadyPresent(AccountId(1)))));
    }

    #[tokio::test]
    async fn test_ensure_default_admin_lookup_failure() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("relation does not exist".to_string())));
        repository.expect_create().times(0);

        let result = service(repository).ensure_default_admin().await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_ensure_default_admin_create_failure() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AccountError::RecordNotFound));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("disk full".to_string())));

        let result = service(repository).ensure_default_admin().await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }
}
