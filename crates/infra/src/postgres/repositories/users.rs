use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::{
    entities::users::{InsertUserEntity, UserEntity},
    postgres_connection::PgPoolSquad,
    schema::users,
};
use domain::{
    entities::users::User,
    repositories::{errors::UniqueViolation, users::UserRepository},
    value_objects::emails::Email,
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::email.eq(email.value()))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::id.eq(id))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn create(&self, user: &User) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(users::table)
            .values(InsertUserEntity::from(user))
            .execute(&mut conn)
            .map_err(insert_error)?;

        Ok(())
    }
}

fn insert_error(err: DieselError) -> anyhow::Error {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            anyhow::Error::new(UniqueViolation)
        }
        other => anyhow::Error::new(other),
    }
}
