use std::fmt::Display;

use thiserror::Error;

pub const CPF_LENGTH: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpfError {
    #[error("invalid CPF: invalid length")]
    InvalidLength,
    #[error("invalid CPF: non-digit characters")]
    NonDigit,
    #[error("invalid CPF: invalid checksum")]
    InvalidChecksum,
}

/// Brazilian individual taxpayer number, kept as its 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Accepts `46137164039` as well as `461.371.640-39`.
    pub fn new(raw: &str) -> Result<Self, CpfError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '/') && !c.is_whitespace())
            .collect();

        if cleaned.chars().count() != CPF_LENGTH {
            return Err(CpfError::InvalidLength);
        }
        if !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(CpfError::NonDigit);
        }

        let digits: Vec<u32> = cleaned.bytes().map(|b| u32::from(b - b'0')).collect();

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(CpfError::InvalidChecksum);
        }
        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(CpfError::InvalidChecksum);
        }

        Ok(Self(cleaned))
    }

    /// Digits only.
    pub fn value(&self) -> &str {
        &self.0
    }
}

// Weights run from len+1 down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=digits.len() as u32 + 1).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

impl Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_and_raw_inputs_are_equal() {
        let formatted = Cpf::new("461.371.640-39").unwrap();
        let raw = Cpf::new("46137164039").unwrap();

        assert_eq!(formatted, raw);
        assert_eq!(raw.value(), "46137164039");
        assert_eq!(raw.to_string(), "461.371.640-39");
    }

    #[test]
    fn valid_checksums_are_accepted() {
        for raw in [
            "39825979194",
            "90748337806",
            "87623286030",
            "129.040.479-80",
            "666 972 510 85",
        ] {
            let cpf = Cpf::new(raw).unwrap_or_else(|err| panic!("{raw}: {err}"));
            assert_eq!(cpf.value().len(), CPF_LENGTH);
        }
    }

    #[test]
    fn repeated_digits_are_rejected() {
        for digit in 0..=9 {
            let raw = digit.to_string().repeat(CPF_LENGTH);
            assert_eq!(Cpf::new(&raw), Err(CpfError::InvalidChecksum), "{raw}");
        }
    }

    #[test]
    fn wrong_check_digits_are_rejected() {
        assert_eq!(Cpf::new("46137164038"), Err(CpfError::InvalidChecksum));
        assert_eq!(Cpf::new("46137164049"), Err(CpfError::InvalidChecksum));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(Cpf::new(""), Err(CpfError::InvalidLength));
        assert_eq!(Cpf::new("4613716403"), Err(CpfError::InvalidLength));
        assert_eq!(Cpf::new("461371640399"), Err(CpfError::InvalidLength));
    }

    #[test]
    fn letters_are_rejected() {
        assert_eq!(Cpf::new("4613716403a"), Err(CpfError::NonDigit));
    }
}
