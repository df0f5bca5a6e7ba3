use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// A verified webhook event. `object` is the raw `data.object` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEvent {
    pub id: Option<String>,
    pub event_type: String,
    pub object: serde_json::Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Returns the provider customer ID.
    async fn create_customer(&self, email: &str, name: &str, user_id: Uuid) -> Result<String>;

    /// Returns the provider subscription ID.
    async fn create_trial_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
        trial_days: i64,
    ) -> Result<String>;

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<()>;

    fn verify_webhook(&self, payload: &[u8], signature: &str) -> Result<PaymentEvent>;
}
