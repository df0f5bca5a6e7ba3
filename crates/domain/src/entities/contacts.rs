use crate::value_objects::{emails::Email, errors::ValidationError, phones::Phone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    email: Email,
    phone: Phone,
}

impl Contact {
    pub fn new(email: &str, phone: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            phone: Phone::new(phone)?,
        })
    }

    pub fn from_values(email: Email, phone: Phone) -> Self {
        Self { email, phone }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }
}
