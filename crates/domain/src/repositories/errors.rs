use thiserror::Error;

/// Returned by a repository when an insert hits a unique constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unique constraint violated")]
pub struct UniqueViolation;
