use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store.
///
/// Identifiers are assigned sequentially from 1. Username uniqueness is
/// checked under the write lock, so concurrent creates cannot both succeed.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    accounts: BTreeMap<AccountId, Account>,
    last_id: i64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        let state = self.state.read().await;
        Ok(state.accounts.values().any(|a| a.username == username))
    }

    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut state = self.state.write().await;

        if state
            .accounts
            .values()
            .any(|a| a.username == account.username)
        {
            return Err(AccountError::DuplicateKey(account.username));
        }

        state.last_id += 1;
        let account = Account {
            id: AccountId(state.last_id),
            ..account
        };
        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Account, AccountError> {
        let state = self.state.read().await;
        state
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned()
            .ok_or(AccountError::RecordNotFound)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Account, AccountError> {
        let state = self.state.read().await;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or(AccountError::RecordNotFound)
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(AccountError::RecordNotFound)?;

        account.password_hash = password_hash.to_string();

        Ok(())
    }
}
