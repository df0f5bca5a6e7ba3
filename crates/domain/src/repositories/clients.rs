use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::clients::Client;
use crate::value_objects::{clients::ClientQuery, cpf::Cpf};

#[automock]
#[async_trait]
pub trait ClientRepository {
    /// CPFs are unique per creator, not globally.
    async fn find_by_cpf(&self, creator_id: Uuid, cpf: &Cpf) -> Result<Option<Client>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>>;
    async fn create(&self, client: &Client) -> Result<()>;
    /// All clients are stored or none are.
    async fn create_batch(&self, clients: &[Client]) -> Result<()>;
    async fn update(&self, client: &Client) -> Result<()>;
    /// One page of clients plus the total number of matches.
    async fn list(&self, query: &ClientQuery) -> Result<(Vec<Client>, i64)>;
}
