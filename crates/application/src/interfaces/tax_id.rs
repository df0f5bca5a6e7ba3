use async_trait::async_trait;
use domain::value_objects::{birth_dates::BirthDate, cpf::Cpf};
use thiserror::Error;

/// Registry data returned for a CPF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpfLookup {
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    /// Registration status, e.g. `REGULAR`.
    pub registration_status: String,
}

#[derive(Debug, Error)]
pub enum TaxIdError {
    #[error("tax-ID lookup timed out")]
    Timeout,
    #[error("tax-ID lookup rejected the CPF: {0}")]
    Rejected(String),
    #[error("tax-ID lookup unavailable: {0}")]
    Unavailable(String),
}

impl TaxIdError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TaxIdError::Timeout | TaxIdError::Unavailable(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaxIdVerifier: Send + Sync {
    async fn consult_cpf(&self, cpf: &Cpf, birth_date: BirthDate) -> Result<CpfLookup, TaxIdError>;
}
