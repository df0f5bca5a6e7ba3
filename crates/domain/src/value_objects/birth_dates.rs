use std::fmt::Display;

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const ADULT_AGE: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BirthDateError {
    #[error("invalid birth date: format must be YYYY-MM-DD or DD/MM/YYYY")]
    InvalidFormat,
    #[error("invalid year: must be between {min} and {max}")]
    YearOutOfRange { min: i32, max: i32 },
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("birth date cannot be in the future")]
    InFuture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, BirthDateError> {
        Self::new_as_of(year, month, day, today())
    }

    /// Validates against `today` instead of the system clock.
    pub fn new_as_of(
        year: i32,
        month: u32,
        day: u32,
        today: NaiveDate,
    ) -> Result<Self, BirthDateError> {
        if year < MIN_BIRTH_YEAR || year > today.year() {
            return Err(BirthDateError::YearOutOfRange {
                min: MIN_BIRTH_YEAR,
                max: today.year(),
            });
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(BirthDateError::InvalidDate { year, month, day })?;

        if date > today {
            return Err(BirthDateError::InFuture);
        }

        Ok(Self(date))
    }

    pub fn from_date(date: NaiveDate) -> Result<Self, BirthDateError> {
        Self::new(date.year(), date.month(), date.day())
    }

    /// Accepts `YYYY-MM-DD` (HTML date input) and `DD/MM/YYYY` (masked text input).
    pub fn parse(raw: &str) -> Result<Self, BirthDateError> {
        Self::parse_as_of(raw, today())
    }

    pub fn parse_as_of(raw: &str, today: NaiveDate) -> Result<Self, BirthDateError> {
        let (year, month, day) = split_components(raw.trim()).ok_or(BirthDateError::InvalidFormat)?;
        Self::new_as_of(year, month, day, today)
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }

    pub fn age(&self) -> u32 {
        self.age_on(today())
    }

    /// Whole years completed on `date`.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut age = date.year() - self.0.year();
        if (date.month(), date.day()) < (self.0.month(), self.0.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }

    pub fn is_adult(&self) -> bool {
        self.is_adult_on(today())
    }

    pub fn is_adult_on(&self, date: NaiveDate) -> bool {
        self.age_on(date) >= ADULT_AGE
    }

    /// `DD/MM/YYYY`, the format the tax-ID lookup expects.
    pub fn to_br_format(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn split_components(raw: &str) -> Option<(i32, u32, u32)> {
    let (separator, year_first) = if raw.contains('-') {
        ('-', true)
    } else if raw.contains('/') {
        ('/', false)
    } else {
        return None;
    };

    let parts: Vec<&str> = raw.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };

    let (year, month, day) = if year_first {
        (*first, *second, *third)
    } else {
        (*third, *second, *first)
    };

    if year.len() != 4 || month.is_empty() || month.len() > 2 || day.is_empty() || day.len() > 2 {
        return None;
    }

    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn both_text_formats_are_parsed() {
        let iso = BirthDate::parse_as_of("1990-05-17", fixed_today()).unwrap();
        let br = BirthDate::parse_as_of("17/05/1990", fixed_today()).unwrap();

        assert_eq!(iso, br);
        assert_eq!(iso.to_string(), "1990-05-17");
        assert_eq!(iso.to_br_format(), "17/05/1990");
    }

    #[test]
    fn garbage_is_an_invalid_format() {
        for raw in ["", "1990", "1990-05", "90-05-17", "1990.05.17", "aaaa-bb-cc"] {
            assert_eq!(
                BirthDate::parse_as_of(raw, fixed_today()),
                Err(BirthDateError::InvalidFormat),
                "{raw}"
            );
        }
    }

    #[test]
    fn calendar_overflow_is_rejected() {
        for (year, month, day) in [(1990, 2, 30), (1990, 2, 29), (1990, 4, 31), (1990, 13, 1), (1990, 0, 10), (1990, 1, 0)]
        {
            assert_eq!(
                BirthDate::new_as_of(year, month, day, fixed_today()),
                Err(BirthDateError::InvalidDate { year, month, day })
            );
        }
        assert_eq!(
            BirthDate::parse_as_of("30/02/1990", fixed_today()),
            Err(BirthDateError::InvalidDate { year: 1990, month: 2, day: 30 })
        );
    }

    #[test]
    fn leap_day_is_accepted_on_leap_years() {
        assert!(BirthDate::new_as_of(1992, 2, 29, fixed_today()).is_ok());
    }

    #[test]
    fn year_must_be_in_range() {
        let expected = Err(BirthDateError::YearOutOfRange { min: 1900, max: 2026 });
        assert_eq!(BirthDate::new_as_of(1899, 12, 31, fixed_today()), expected);
        assert_eq!(BirthDate::new_as_of(2027, 1, 1, fixed_today()), expected);
        assert!(BirthDate::new_as_of(1900, 1, 1, fixed_today()).is_ok());
    }

    #[test]
    fn future_dates_are_rejected() {
        assert_eq!(
            BirthDate::new_as_of(2026, 10, 15, fixed_today()),
            Err(BirthDateError::InFuture)
        );
        assert!(BirthDate::new_as_of(2026, 10, 14, fixed_today()).is_ok());
    }

    #[test]
    fn age_counts_completed_years() {
        let today = fixed_today();
        let birthday_today = BirthDate::new_as_of(2001, 10, 14, today).unwrap();
        let birthday_next_month = BirthDate::new_as_of(2001, 11, 1, today).unwrap();
        let birthday_tomorrow = BirthDate::new_as_of(2001, 10, 15, today).unwrap();

        assert_eq!(birthday_today.age_on(today), 25);
        assert_eq!(birthday_next_month.age_on(today), 24);
        assert_eq!(birthday_tomorrow.age_on(today), 24);
    }

    #[test]
    fn age_relative_to_the_system_clock() {
        let today = Utc::now().date_naive();
        let twenty_five_years_ago = today.checked_sub_months(Months::new(25 * 12)).unwrap();
        let birth = BirthDate::from_date(twenty_five_years_ago).unwrap();
        assert_eq!(birth.age(), 25);

        let not_yet = twenty_five_years_ago.checked_add_months(Months::new(1)).unwrap();
        let birth = BirthDate::from_date(not_yet).unwrap();
        assert_eq!(birth.age(), 24);
    }

    #[test]
    fn adulthood_starts_on_the_eighteenth_birthday() {
        let birth = BirthDate::new_as_of(2000, 3, 15, fixed_today()).unwrap();
        let eighteenth = NaiveDate::from_ymd_opt(2018, 3, 15).unwrap();
        let day_before = NaiveDate::from_ymd_opt(2018, 3, 14).unwrap();

        assert!(birth.is_adult_on(eighteenth));
        assert!(!birth.is_adult_on(day_before));
    }
}
