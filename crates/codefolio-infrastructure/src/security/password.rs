use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use codefolio_domain::shared::DomainError;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy)]
pub struct PasswordHashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Hashes account passwords into PHC strings
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new(params: PasswordHashParams) -> Result<Self, DomainError> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| DomainError::Infrastructure(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::Infrastructure(format!("Failed to hash password: {}", e)))
    }

    /// `Ok(false)` on mismatch; `Err` only for an unreadable stored hash
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| DomainError::DataIntegrity(format!("Stored password hash is invalid: {}", e)))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::Infrastructure(format!(
                "Failed to verify password: {}",
                e
            ))),
        }
    }
}
