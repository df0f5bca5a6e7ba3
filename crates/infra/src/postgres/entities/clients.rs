use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::postgres::schema::clients;
use domain::{entities::clients::Client, value_objects::birth_dates::BirthDate};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = clients)]
pub struct ClientEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientEntity {
    pub fn to_domain(&self) -> Result<Client> {
        let client = Client::restore(
            self.id,
            self.creator_id,
            &self.name,
            &self.cpf,
            BirthDate::from_date(self.birth_date)?,
            &self.email,
            &self.phone,
        )?;
        Ok(client)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub struct InsertClientEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
}

impl From<&Client> for InsertClientEntity {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id(),
            creator_id: client.creator_id(),
            name: client.name().to_string(),
            cpf: client.cpf().value().to_string(),
            birth_date: client.birth_date().value(),
            email: client.email().value().to_string(),
            phone: client.phone().value().to_string(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clients)]
pub struct UpdateClientEntity {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&Client> for UpdateClientEntity {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name().to_string(),
            cpf: client.cpf().value().to_string(),
            email: client.email().value().to_string(),
            phone: client.phone().value().to_string(),
            updated_at: Utc::now(),
        }
    }
}
