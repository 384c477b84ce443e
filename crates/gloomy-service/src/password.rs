//! Argon2 hashing for anonymous-author passwords.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use gloomy_core::author::NonUser;
use rand_core::OsRng;

use crate::{Error, Result};

/// Hash `plain` into a PHC string. Runs on the blocking pool.
pub async fn hash_password(plain: String) -> Result<String> {
  tokio::task::spawn_blocking(move || {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(plain.as_bytes(), &salt)
      .map(|h| h.to_string())
      .map_err(|e| Error::Password(e.to_string()))
  })
  .await
  .map_err(|e| Error::Password(e.to_string()))?
}

/// Check a plaintext password against a stored PHC string.
pub fn verify_password(plain: &str, hash: &str) -> bool {
  PasswordHash::new(hash)
    .and_then(|parsed| Argon2::default().verify_password(plain.as_bytes(), &parsed))
    .is_ok()
}

/// Whether `plain` is the password this anonymous author registered with.
pub fn verify_non_user(non_user: &NonUser, plain: &str) -> bool {
  verify_password(plain, &non_user.password_hash)
}
