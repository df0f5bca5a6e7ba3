use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::users::User;
use crate::value_objects::emails::Email;

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn create(&self, user: &User) -> Result<()>;
}
