use anyhow::{Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::config::SecurityConfig;

/// Argon2id hashing of account passwords into PHC strings.
#[derive(Debug, Clone)]
pub struct Passwords {
    params: Params,
}

impl Passwords {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.password_memory_kib,
            config.password_iterations,
            1,
            None,
        )
        .map_err(|e| anyhow!("invalid password hashing parameters: {e}"))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash password: {e}"))?;

        Ok(hash.to_string())
    }

    /// `Ok(false)` on a wrong password; `Err` only when the stored hash is unusable.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| anyhow!("stored password hash is malformed: {e}"))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("failed to verify password: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Passwords;
    use crate::config::SecurityConfig;

    fn cheap() -> Passwords {
        Passwords::new(&SecurityConfig {
            password_memory_kib: 1024,
            password_iterations: 1,
        })
        .expect("params should be valid")
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let passwords = cheap();
        let hash = passwords.hash("correct horse").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify("correct horse", &hash).expect("verify"));
        assert!(!passwords.verify("wrong horse", &hash).expect("verify"));
    }

    #[test]
    fn same_password_gets_a_fresh_salt() {
        let passwords = cheap();

        assert_ne!(
            passwords.hash("secret123").expect("hash"),
            passwords.hash("secret123").expect("hash")
        );
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(cheap().verify("secret123", "not-a-phc-string").is_err());
    }

    #[test]
    fn zero_iterations_are_rejected() {
        let result = Passwords::new(&SecurityConfig {
            password_memory_kib: 1024,
            password_iterations: 0,
        });

        assert!(result.is_err());
    }
}
