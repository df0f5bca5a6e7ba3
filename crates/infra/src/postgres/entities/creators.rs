use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::postgres::schema::creators;
use domain::{
    entities::{contacts::Contact, creators::Creator},
    value_objects::birth_dates::BirthDate,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = creators)]
pub struct CreatorEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatorEntity {
    pub fn to_domain(&self) -> Result<Creator> {
        let creator = Creator::restore(
            self.id,
            self.user_id,
            &self.name,
            &self.cpf,
            BirthDate::from_date(self.birth_date)?,
            Contact::new(&self.email, &self.phone)?,
        )?;
        Ok(creator)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = creators)]
pub struct InsertCreatorEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}

impl From<&Creator> for InsertCreatorEntity {
    fn from(creator: &Creator) -> Self {
        Self {
            id: creator.id(),
            user_id: creator.user_id(),
            name: creator.name().to_string(),
            cpf: creator.cpf().value().to_string(),
            birth_date: creator.birth_date().value(),
            email: creator.contact().email().value().to_string(),
            phone: creator.contact().phone().value().to_string(),
        }
    }
}
