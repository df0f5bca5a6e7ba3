use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::{
    entities::creators::{CreatorEntity, InsertCreatorEntity},
    postgres_connection::PgPoolSquad,
    schema::creators,
};
use domain::{
    entities::creators::Creator, repositories::creators::CreatorRepository,
    value_objects::cpf::Cpf,
};

pub struct CreatorPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CreatorPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CreatorRepository for CreatorPostgres {
    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<Creator>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = creators::table
            .filter(creators::cpf.eq(cpf.value()))
            .select(CreatorEntity::as_select())
            .first::<CreatorEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Creator>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = creators::table
            .filter(creators::user_id.eq(user_id))
            .select(CreatorEntity::as_select())
            .first::<CreatorEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn create(&self, creator: &Creator) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(creators::table)
            .values(InsertCreatorEntity::from(creator))
            .execute(&mut conn)?;

        Ok(())
    }
}
