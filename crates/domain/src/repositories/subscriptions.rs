use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::subscriptions::Subscription;

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Subscription>>;
    async fn find_by_provider_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>>;
    async fn create(&self, subscription: &Subscription) -> Result<()>;
    async fn save(&self, subscription: &Subscription) -> Result<()>;
}
