use anyhow::Result;
use domain::value_objects::passwords::Password;

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &Password) -> Result<String>;
    /// `Ok(false)` for a wrong password, `Err` only for an unreadable hash.
    fn verify(&self, candidate: &str, password_hash: &str) -> Result<bool>;
}
