use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, insert_into, pg::Pg, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::{
    entities::clients::{ClientEntity, InsertClientEntity, UpdateClientEntity},
    postgres_connection::PgPoolSquad,
    schema::clients,
};
use domain::{
    entities::clients::Client,
    repositories::clients::ClientRepository,
    value_objects::{clients::ClientQuery, cpf::Cpf},
};

pub struct ClientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn find_by_cpf(&self, creator_id: Uuid, cpf: &Cpf) -> Result<Option<Client>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = clients::table
            .filter(clients::creator_id.eq(creator_id))
            .filter(clients::cpf.eq(cpf.value()))
            .select(ClientEntity::as_select())
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = clients::table
            .filter(clients::id.eq(id))
            .select(ClientEntity::as_select())
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        result.map(|entity| entity.to_domain()).transpose()
    }

    async fn create(&self, client: &Client) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(clients::table)
            .values(InsertClientEntity::from(client))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn create_batch(&self, clients: &[Client]) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let entities: Vec<InsertClientEntity> =
            clients.iter().map(InsertClientEntity::from).collect();

        conn.transaction::<_, diesel::result::Error, _>(|tx| {
            insert_into(clients::table).values(&entities).execute(tx)?;
            Ok(())
        })?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(clients::table)
            .filter(clients::id.eq(client.id()))
            .filter(clients::creator_id.eq(client.creator_id()))
            .set(UpdateClientEntity::from(client))
            .execute(&mut conn)?;

        if affected == 0 {
            anyhow::bail!("client {} not found for update", client.id());
        }
        Ok(())
    }

    async fn list(&self, query: &ClientQuery) -> Result<(Vec<Client>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = filtered(query).count().get_result::<i64>(&mut conn)?;

        let rows = filtered(query)
            .select(ClientEntity::as_select())
            .order((clients::name.asc(), clients::id.asc()))
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<ClientEntity>(&mut conn)?;

        let clients = rows
            .iter()
            .map(ClientEntity::to_domain)
            .collect::<Result<Vec<_>>>()?;

        Ok((clients, total))
    }
}

// Name matches case-insensitively; a term with digits also matches the stored CPF digits.
fn filtered(query: &ClientQuery) -> clients::BoxedQuery<'static, Pg> {
    let mut boxed = clients::table
        .filter(clients::creator_id.eq(query.creator_id))
        .into_boxed();

    if let Some(term) = query.term() {
        let by_name = clients::name.ilike(format!("%{}%", escape_like(term)));
        boxed = match query.cpf_term() {
            Some(digits) => boxed.filter(by_name.or(clients::cpf.like(format!("%{digits}%")))),
            None => boxed.filter(by_name),
        };
    }

    boxed
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
