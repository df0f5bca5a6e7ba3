use uuid::Uuid;

use crate::value_objects::{
    birth_dates::BirthDate, cpf::Cpf, emails::Email, errors::ValidationError, phones::Phone,
};

pub const CLIENT_NAME_MIN_LEN: usize = 5;
pub const CLIENT_NAME_MAX_LEN: usize = 255;

/// An end customer of a creator. Every field is validated; there is no way to hold a partial client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: Uuid,
    creator_id: Uuid,
    name: String,
    cpf: Cpf,
    birth_date: BirthDate,
    email: Email,
    phone: Phone,
}

impl Client {
    pub fn new(
        creator_id: Uuid,
        name: &str,
        cpf: &str,
        birth_date: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let cpf = Cpf::new(cpf)?;
        let birth_date = BirthDate::parse(birth_date)?;
        let email = Email::new(email)?;
        let phone = Phone::new(phone)?;

        Ok(Self {
            id: Uuid::new_v4(),
            creator_id,
            name,
            cpf,
            birth_date,
            email,
            phone,
        })
    }

    /// Builds a client from already validated parts; only the name is checked.
    pub fn from_values(
        creator_id: Uuid,
        name: &str,
        cpf: Cpf,
        birth_date: BirthDate,
        email: Email,
        phone: Phone,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            creator_id,
            name: validate_name(name)?,
            cpf,
            birth_date,
            email,
            phone,
        })
    }

    /// Rehydrates a stored client. Stored data is validated again.
    pub fn restore(
        id: Uuid,
        creator_id: Uuid,
        name: &str,
        cpf: &str,
        birth_date: BirthDate,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            creator_id,
            name: validate_name(name)?,
            cpf: Cpf::new(cpf)?,
            birth_date,
            email: Email::new(email)?,
            phone: Phone::new(phone)?,
        })
    }

    /// Replaces name, CPF, email and phone. Nothing changes unless every field is valid.
    pub fn update(
        &mut self,
        name: &str,
        cpf: &str,
        email: &str,
        phone: &str,
    ) -> Result<(), ValidationError> {
        let name = validate_name(name)?;
        let cpf = Cpf::new(cpf)?;
        let email = Email::new(email)?;
        let phone = Phone::new(phone)?;

        self.name = name;
        self.cpf = cpf;
        self.email = email;
        self.phone = phone;
        Ok(())
    }

    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn is_owned_by(&self, creator_id: Uuid) -> bool {
        self.creator_id == creator_id
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn creator_id(&self) -> Uuid {
        self.creator_id
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

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let len = name.chars().count();
    if !(CLIENT_NAME_MIN_LEN..=CLIENT_NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength {
            min: CLIENT_NAME_MIN_LEN,
            max: CLIENT_NAME_MAX_LEN,
        });
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{cpf::CpfError, emails::EmailError, phones::PhoneError};

    fn client() -> Client {
        Client::new(
            Uuid::new_v4(),
            "John Doe",
            "461.371.640-39",
            "1990-05-17",
            "john@example.com",
            "(11) 98765-4321",
        )
        .unwrap()
    }

    #[test]
    fn new_client_holds_normalized_values() {
        let client = client();

        assert_eq!(client.name(), "John Doe");
        assert_eq!(client.cpf().value(), "46137164039");
        assert_eq!(client.birth_date().to_string(), "1990-05-17");
        assert_eq!(client.email().value(), "john@example.com");
        assert_eq!(client.phone().value(), "11987654321");
    }

    #[test]
    fn name_length_is_bounded() {
        let creator_id = Uuid::new_v4();
        let build = |name: &str| {
            Client::new(
                creator_id,
                name,
                "46137164039",
                "1990-05-17",
                "john@example.com",
                "11987654321",
            )
        };

        assert_eq!(build("   ").unwrap_err(), ValidationError::NameRequired);
        assert_eq!(
            build("John").unwrap_err(),
            ValidationError::NameLength { min: 5, max: 255 }
        );
        assert!(build("Johnn").is_ok());
        assert!(build(&"a".repeat(255)).is_ok());
        assert_eq!(
            build(&"a".repeat(256)).unwrap_err(),
            ValidationError::NameLength { min: 5, max: 255 }
        );
    }

    #[test]
    fn first_invalid_field_is_reported() {
        let err = Client::new(
            Uuid::new_v4(),
            "John Doe",
            "123",
            "1990-02-30",
            "not-an-email",
            "123",
        )
        .unwrap_err();

        assert_eq!(err, ValidationError::Cpf(CpfError::InvalidLength));
    }

    #[test]
    fn update_replaces_mutable_fields() {
        let mut client = client();
        let birth_date = client.birth_date();

        client
            .update("Jane Doe", "398.259.791-94", "jane@example.com", "21 99876-5432")
            .unwrap();

        assert_eq!(client.name(), "Jane Doe");
        assert_eq!(client.cpf().value(), "39825979194");
        assert_eq!(client.email().value(), "jane@example.com");
        assert_eq!(client.phone().value(), "21998765432");
        assert_eq!(client.birth_date(), birth_date);
    }

    #[test]
    fn failed_update_leaves_client_untouched() {
        let mut client = client();
        let before = client.clone();

        let err = client
            .update("Jane Doe", "398.259.791-94", "jane@example.com", "20 99876-5432")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Phone(PhoneError::InvalidAreaCode("20".to_string()))
        );

        let err = client
            .update("Jane Doe", "398.259.791-94", "jane@", "21998765432")
            .unwrap_err();
        assert_eq!(err, ValidationError::Email(EmailError::InvalidFormat));

        assert_eq!(client, before);
    }

    #[test]
    fn rename_validates() {
        let mut client = client();
        assert!(client.rename("Abe").is_err());
        assert_eq!(client.name(), "John Doe");

        client.rename("  Johnny Doe ").unwrap();
        assert_eq!(client.name(), "Johnny Doe");
    }
}
