use thiserror::Error;

use super::{
    birth_dates::BirthDateError, cpf::CpfError, emails::EmailError, passwords::PasswordError,
    phones::PhoneError,
};

/// Any reason an aggregate refused its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name must be between {min} and {max} characters")]
    NameLength { min: usize, max: usize },
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("username is required")]
    UsernameRequired,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("creator must be 18 years or older")]
    Underage,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Cpf(#[from] CpfError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Phone(#[from] PhoneError),
    #[error(transparent)]
    BirthDate(#[from] BirthDateError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}
