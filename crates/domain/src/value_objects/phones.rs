use std::fmt::Display;

use thiserror::Error;

pub const PHONE_LENGTH: usize = 11;

const AREA_CODES: [&str; 67] = [
    "11", "12", "13", "14", "15", "16", "17", "18", "19", //
    "21", "22", "24", "27", "28", //
    "31", "32", "33", "34", "35", "37", "38", //
    "41", "42", "43", "44", "45", "46", "47", "48", "49", //
    "51", "53", "54", "55", //
    "61", "62", "63", "64", "65", "66", "67", "68", "69", //
    "71", "73", "74", "75", "77", "79", //
    "81", "82", "83", "84", "85", "86", "87", "88", "89", //
    "91", "92", "93", "94", "95", "96", "97", "98", "99",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("invalid phone number: non-digit characters")]
    NonDigit,
    #[error("invalid phone number length: must have 11 digits")]
    InvalidLength,
    #[error("invalid area code: {0}")]
    InvalidAreaCode(String),
    #[error("invalid phone number: mobile numbers must start with 9")]
    NotMobile,
    #[error("invalid phone number: all digits are the same")]
    RepeatedDigits,
}

/// Brazilian mobile number: two-digit area code followed by a 9-digit number starting with 9.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: &str) -> Result<Self, PhoneError> {
        let digits: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-' | '+' | '.'))
            .collect();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if digits.len() != PHONE_LENGTH {
            return Err(PhoneError::InvalidLength);
        }

        let area_code = &digits[0..2];
        if !AREA_CODES.contains(&area_code) {
            return Err(PhoneError::InvalidAreaCode(area_code.to_string()));
        }
        if &digits[2..3] != "9" {
            return Err(PhoneError::NotMobile);
        }
        if digits.bytes().all(|b| b == digits.as_bytes()[0]) {
            return Err(PhoneError::RepeatedDigits);
        }

        Ok(Self(digits))
    }

    /// Digits only.
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn area_code(&self) -> &str {
        &self.0[0..2]
    }

    pub fn number(&self) -> &str {
        &self.0[2..]
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}-{}", &self.0[0..2], &self.0[2..7], &self.0[7..11])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_stripped() {
        let phone = Phone::new("(11) 98765-4321").unwrap();
        assert_eq!(phone.value(), "11987654321");
        assert_eq!(phone.area_code(), "11");
        assert_eq!(phone.number(), "987654321");
        assert_eq!(phone.to_string(), "(11) 98765-4321");
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(Phone::new("1198765432"), Err(PhoneError::InvalidLength));
        assert_eq!(Phone::new("+55 11 98765-4321"), Err(PhoneError::InvalidLength));
    }

    #[test]
    fn letters_are_rejected() {
        assert_eq!(Phone::new("tel 11x98765-4321"), Err(PhoneError::NonDigit));
        assert_eq!(Phone::new("11 98765-432l"), Err(PhoneError::NonDigit));
    }

    #[test]
    fn unknown_area_code_is_rejected() {
        assert_eq!(
            Phone::new("20987654321"),
            Err(PhoneError::InvalidAreaCode("20".to_string()))
        );
    }

    #[test]
    fn landlines_are_rejected() {
        assert_eq!(Phone::new("11387654321"), Err(PhoneError::NotMobile));
    }

    #[test]
    fn repeated_digits_are_rejected() {
        assert_eq!(Phone::new("99999999999"), Err(PhoneError::RepeatedDigits));
    }
}
