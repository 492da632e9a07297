use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    is_admin: bool,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId(row.id),
            username: row.username,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
        }
    }
}

fn database_error(e: sqlx::Error) -> AccountError {
    AccountError::DatabaseError(e.to_string())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO accounts (username, password_hash, is_admin)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return AccountError::DuplicateKey(account.username.clone());
                }
            }
            database_error(e)
        })?;

        Ok(Account {
            id: AccountId(id),
            ..account
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Account, AccountError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, is_admin
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Account::from)
        .ok_or(AccountError::RecordNotFound)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, is_admin
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Account::from)
        .ok_or(AccountError::RecordNotFound)
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::RecordNotFound);
        }

        Ok(())
    }
}
