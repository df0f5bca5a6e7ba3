use uuid::Uuid;

use super::contacts::Contact;
use crate::value_objects::{birth_dates::BirthDate, cpf::Cpf, errors::ValidationError};

pub const CREATOR_NAME_MAX_LEN: usize = 255;

/// The platform user who owns e-books and registers clients. Always an adult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    id: Uuid,
    user_id: Uuid,
    name: String,
    cpf: Cpf,
    birth_date: BirthDate,
    contact: Contact,
}

impl Creator {
    pub fn new(
        user_id: Uuid,
        name: &str,
        cpf: &str,
        birth_date: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let cpf = Cpf::new(cpf)?;
        let birth_date = BirthDate::parse(birth_date)?;
        let contact = Contact::new(email, phone)?;

        Self::from_values(user_id, &name, cpf, birth_date, contact)
    }

    pub fn from_values(
        user_id: Uuid,
        name: &str,
        cpf: Cpf,
        birth_date: BirthDate,
        contact: Contact,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        if !birth_date.is_adult() {
            return Err(ValidationError::Underage);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            cpf,
            birth_date,
            contact,
        })
    }

    pub fn restore(
        id: Uuid,
        user_id: Uuid,
        name: &str,
        cpf: &str,
        birth_date: BirthDate,
        contact: Contact,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            user_id,
            name: validate_name(name)?,
            cpf: Cpf::new(cpf)?,
            birth_date,
            contact,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if name.chars().count() > CREATOR_NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong {
            max: CREATOR_NAME_MAX_LEN,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Months, Utc};

    fn years_ago(years: u32) -> chrono::NaiveDate {
        Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(years * 12))
            .unwrap()
    }

    #[test]
    fn adult_creator_is_accepted() {
        let creator = Creator::new(
            Uuid::new_v4(),
            "Maria Silva",
            "461.371.640-39",
            "17/05/1985",
            "maria@example.com",
            "11987654321",
        )
        .unwrap();

        assert_eq!(creator.name(), "Maria Silva");
        assert_eq!(creator.contact().email().value(), "maria@example.com");
    }

    #[test]
    fn eighteenth_birthday_today_is_an_adult() {
        let birth_date = BirthDate::from_date(years_ago(18)).unwrap();
        let contact = Contact::new("maria@example.com", "11987654321").unwrap();

        let creator = Creator::from_values(
            Uuid::new_v4(),
            "Maria Silva",
            Cpf::new("46137164039").unwrap(),
            birth_date,
            contact,
        );
        assert!(creator.is_ok());
    }

    #[test]
    fn minors_are_rejected() {
        let birth_date =
            BirthDate::from_date(years_ago(18).checked_add_days(Days::new(1)).unwrap()).unwrap();
        let contact = Contact::new("maria@example.com", "11987654321").unwrap();

        let err = Creator::from_values(
            Uuid::new_v4(),
            "Maria Silva",
            Cpf::new("46137164039").unwrap(),
            birth_date,
            contact,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::Underage);
        assert_eq!(err.to_string(), "creator must be 18 years or older");
    }

    #[test]
    fn name_is_required_and_bounded() {
        let build = |name: &str| {
            Creator::new(
                Uuid::new_v4(),
                name,
                "46137164039",
                "1985-05-17",
                "maria@example.com",
                "11987654321",
            )
        };

        assert_eq!(build("").unwrap_err(), ValidationError::NameRequired);
        assert_eq!(
            build(&"a".repeat(256)).unwrap_err(),
            ValidationError::NameTooLong { max: 255 }
        );
        assert!(build("Ana").is_ok());
    }
}
