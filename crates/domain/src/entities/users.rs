use uuid::Uuid;

use crate::value_objects::{emails::Email, errors::ValidationError};

pub const USERNAME_MAX_LEN: usize = 50;

/// Login account. The hash is produced outside the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    username: String,
    email: Email,
    password_hash: String,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: String) -> Result<Self, ValidationError> {
        Self::restore(Uuid::new_v4(), username, email, password_hash)
    }

    pub fn restore(
        id: Uuid,
        username: &str,
        email: &str,
        password_hash: String,
    ) -> Result<Self, ValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(ValidationError::UsernameTooLong {
                max: USERNAME_MAX_LEN,
            });
        }

        Ok(Self {
            id,
            username: username.to_string(),
            email: Email::new(email)?,
            password_hash,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
