//! Argon2id adapter behind the account service's password hashing port.
//!
//! Cost parameters follow the current OWASP password storage cheat sheet
//! for Argon2id. A wrong password is a normal `Ok(false)` outcome; only a
//! corrupt stored hash or an RNG failure surfaces as an error.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version};
use rosterly_application::PasswordHasher;
use rosterly_core::{AppError, AppResult};

const MEMORY_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

/// Hashes and verifies account passwords with Argon2id.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    hasher: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the fixed cost parameters above.
    #[must_use]
    pub fn new() -> Self {
        let params =
            Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None).unwrap_or_default();

        Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        argon2::PasswordHasher::hash_password(&self.hasher, password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("password hashing failed: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        // A hash that does not parse was never produced by this adapter;
        // that is store corruption, not a login failure.
        let stored = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is not parseable: {error}"))
        })?;

        match self.hasher.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}
