//! Account lookup and credential issuance for login.
//!
//! Follows OWASP guidance on generic error messages: every login failure
//! collapses to one indistinguishable outcome.

use std::sync::Arc;

use async_trait::async_trait;
use rosterly_core::{AccountRole, AppError, AppResult, SubjectId};

use crate::{TokenPair, TokenService};

/// Account record returned by repository queries.
#[derive(Clone)]
pub struct AccountRecord {
    /// Stable subject identifier; carried into issued credentials.
    pub subject: SubjectId,
    /// Login name.
    pub username: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Account role.
    pub role: AccountRole,
}

// Hand-written so the stored hash never reaches log output.
impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AccountRecord")
            .field("subject", &self.subject)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Repository port for account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an account by its login name.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<AccountRecord>>;
}

/// Port for password hashing operations. Keeps the application layer free
/// of direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Application service for password login and credential issuance.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            password_hasher,
            tokens,
        }
    }

    /// Authenticates a username/password pair and issues the credential
    /// pair on success.
    ///
    /// Unknown usernames and wrong passwords return the same generic
    /// `Unauthorized` outcome to prevent account enumeration.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let account = self.users.find_by_username(username).await?;

        let Some(account) = account else {
            // Hash anyway so unknown usernames do not answer faster.
            let _ = self.password_hasher.hash_password(password);
            return Err(generic_login_failure());
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &account.password_hash)?;

        if !password_valid {
            tracing::warn!(subject = %account.subject, "login rejected");
            return Err(generic_login_failure());
        }

        tracing::info!(subject = %account.subject, role = account.role.as_str(), "login succeeded");
        self.tokens.issue_pair(account.subject, account.role)
    }
}

fn generic_login_failure() -> AppError {
    AppError::Unauthorized("username or password is incorrect".to_owned())
}
