use std::{fmt::Display, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

pub const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email is required")]
    Empty,
    #[error("invalid email address")]
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(trimmed) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for raw in [
            "john@example.com",
            "john.doe+ebooks@mail.example.com.br",
            "a_b-c%d@sub-domain.io",
        ] {
            assert_eq!(Email::new(raw).unwrap().value(), raw);
        }
    }

    #[test]
    fn surrounding_whitespace_is_dropped() {
        assert_eq!(Email::new("  john@example.com ").unwrap().value(), "john@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        for raw in [
            "john",
            "john@",
            "@example.com",
            "john@example",
            "john@example.c",
            "john doe@example.com",
        ] {
            assert_eq!(Email::new(raw), Err(EmailError::InvalidFormat), "{raw}");
        }
    }

    #[test]
    fn equality_is_exact() {
        assert_ne!(
            Email::new("John@example.com").unwrap(),
            Email::new("john@example.com").unwrap()
        );
    }
}
