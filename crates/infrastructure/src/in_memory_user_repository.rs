use std::collections::HashMap;

use async_trait::async_trait;
use rosterly_application::{AccountRecord, UserRepository};
use rosterly_core::{AppError, AppResult};
use tokio::sync::RwLock;

/// In-memory account store keyed by login name.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts an account, rejecting duplicate usernames.
    pub async fn insert(&self, account: AccountRecord) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.username) {
            return Err(AppError::Conflict(format!(
                "account '{}' already exists",
                account.username
            )));
        }

        accounts.insert(account.username.clone(), account);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AccountRecord>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }
}
