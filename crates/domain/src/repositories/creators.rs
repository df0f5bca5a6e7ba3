use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::creators::Creator;
use crate::value_objects::cpf::Cpf;

#[automock]
#[async_trait]
pub trait CreatorRepository {
    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<Creator>>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Creator>>;
    async fn create(&self, creator: &Creator) -> Result<()>;
}
