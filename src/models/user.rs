use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

#[derive(Debug, thiserror::Error)]
#[error("cannot hash password: {0}")]
pub struct PasswordError(String);

/// A login account. The password is only ever held as a salted argon2 hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub hashed_password: String,
    pub role: String,
}

impl User {
    pub fn new(username: &str, password: &str, role: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed_password = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError(e.to_string()))?
            .to_string();

        Ok(Self {
            username: username.to_string(),
            hashed_password,
            role: role.to_string(),
        })
    }

    /// `true` when `password` matches the stored hash.
    pub fn is_correct_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.hashed_password) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!("stored hash for {} is malformed: {}", self.username, err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
