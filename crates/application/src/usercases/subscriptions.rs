use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use domain::{
    entities::subscriptions::Subscription,
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        enums::{access_statuses::AccessStatus, subscription_statuses::SubscriptionStatus},
        subscriptions::SubscriptionStatusDto,
    },
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::interfaces::payments::{PaymentEvent, PaymentGateway};

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("an active trial or subscription is required")]
    PaymentRequired,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("invalid webhook payload: {0}")]
    InvalidWebhook(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, BillingError>;

pub struct BillingUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    payment_gateway: Arc<P>,
}

impl<S, P> BillingUseCase<S, P>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, payment_gateway: Arc<P>) -> Self {
        Self {
            subscription_repo,
            payment_gateway,
        }
    }

    pub async fn access_status(&self, user_id: Uuid) -> UseCaseResult<SubscriptionStatusDto> {
        let status = match self.find(user_id).await? {
            Some(subscription) => SubscriptionStatusDto::from_subscription(&subscription, Utc::now()),
            None => SubscriptionStatusDto::none(),
        };
        Ok(status)
    }

    /// Fails with `PaymentRequired` unless the user is in trial or subscribed.
    pub async fn ensure_access(&self, user_id: Uuid) -> UseCaseResult<AccessStatus> {
        let access = self
            .find(user_id)
            .await?
            .map(|subscription| subscription.access_status())
            .unwrap_or_default();

        if !access.has_access() {
            debug!(%user_id, "subscriptions: access denied");
            return Err(BillingError::PaymentRequired);
        }
        Ok(access)
    }

    pub async fn cancel(&self, user_id: Uuid) -> UseCaseResult<()> {
        let mut subscription = self.require(user_id).await?;

        if let Some(provider_subscription_id) = subscription.subscription_id.clone() {
            info!(%user_id, %provider_subscription_id, "subscriptions: canceling at provider");
            self.payment_gateway
                .cancel_subscription(&provider_subscription_id)
                .await
                .map_err(|err| {
                    error!(
                        %user_id,
                        %provider_subscription_id,
                        error = ?err,
                        "subscriptions: provider cancel failed"
                    );
                    BillingError::Internal(err)
                })?;
        }

        subscription.cancel_subscription();
        self.save(&subscription).await?;

        info!(%user_id, "subscriptions: subscription canceled");
        Ok(())
    }

    pub async fn end_trial(&self, user_id: Uuid) -> UseCaseResult<()> {
        let mut subscription = self.require(user_id).await?;
        subscription.end_trial();
        self.save(&subscription).await?;

        info!(%user_id, "subscriptions: trial ended");
        Ok(())
    }

    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> UseCaseResult<()> {
        let event = self
            .payment_gateway
            .verify_webhook(payload, signature)
            .map_err(|err| {
                warn!(error = %err, "subscriptions: webhook verification failed");
                BillingError::InvalidWebhook("signature verification failed".to_string())
            })?;

        info!(event_type = %event.event_type, event_id = ?event.id, "subscriptions: webhook verified");

        match event.event_type.as_str() {
            "customer.subscription.updated" | "customer.subscription.deleted" => {
                self.handle_subscription_change(&event).await
            }
            "invoice.paid" => {
                self.handle_invoice(&event, SubscriptionStatus::Active)
                    .await
            }
            "invoice.payment_failed" => {
                self.handle_invoice(&event, SubscriptionStatus::PastDue)
                    .await
            }
            other => {
                debug!(event_type = %other, "subscriptions: unhandled webhook event");
                Ok(())
            }
        }
    }

    async fn handle_subscription_change(&self, event: &PaymentEvent) -> UseCaseResult<()> {
        #[derive(Deserialize)]
        struct SubscriptionObject {
            id: Option<String>,
            customer: Option<String>,
            status: Option<String>,
            current_period_end: Option<i64>,
            ended_at: Option<i64>,
        }

        let object: SubscriptionObject =
            serde_json::from_value(event.object.clone()).map_err(|err| {
                warn!(error = %err, "subscriptions: invalid subscription payload in webhook");
                BillingError::InvalidWebhook("invalid subscription payload".to_string())
            })?;

        let provider_subscription_id = object
            .id
            .ok_or_else(|| BillingError::InvalidWebhook("missing subscription id".to_string()))?;

        let Some(mut subscription) = self.find_by_provider_id(&provider_subscription_id).await?
        else {
            warn!(%provider_subscription_id, "subscriptions: webhook for unknown subscription");
            return Ok(());
        };

        let status = if event.event_type == "customer.subscription.deleted" {
            Some(SubscriptionStatus::Canceled)
        } else {
            object.status.as_deref().and_then(SubscriptionStatus::parse)
        };
        let Some(status) = status else {
            warn!(
                %provider_subscription_id,
                status = ?object.status,
                "subscriptions: unsupported subscription status"
            );
            return Ok(());
        };

        let end_date = object
            .ended_at
            .or(object.current_period_end)
            .and_then(timestamp);
        if let Some(customer_id) = object.customer.as_deref() {
            subscription.customer_id = Some(customer_id.to_string());
        }
        if status != SubscriptionStatus::Trialing {
            subscription.end_trial();
        }
        subscription.update_status(status, end_date, Utc::now());

        info!(%provider_subscription_id, %status, "subscriptions: status updated from webhook");
        self.save(&subscription).await
    }

    async fn handle_invoice(
        &self,
        event: &PaymentEvent,
        status: SubscriptionStatus,
    ) -> UseCaseResult<()> {
        #[derive(Deserialize)]
        struct InvoiceObject {
            subscription: Option<String>,
            period_end: Option<i64>,
        }

        let invoice: InvoiceObject =
            serde_json::from_value(event.object.clone()).map_err(|err| {
                warn!(error = %err, "subscriptions: invalid invoice payload in webhook");
                BillingError::InvalidWebhook("invalid invoice payload".to_string())
            })?;

        let provider_subscription_id = invoice.subscription.ok_or_else(|| {
            BillingError::InvalidWebhook("invoice missing subscription id".to_string())
        })?;

        let Some(mut subscription) = self.find_by_provider_id(&provider_subscription_id).await?
        else {
            warn!(%provider_subscription_id, "subscriptions: invoice for unknown subscription");
            return Ok(());
        };

        let end_date = invoice
            .period_end
            .and_then(timestamp)
            .or(subscription.subscription_end_date);
        if status == SubscriptionStatus::Active {
            subscription.end_trial();
        }
        subscription.update_status(status, end_date, Utc::now());

        info!(%provider_subscription_id, %status, "subscriptions: status updated from invoice");
        self.save(&subscription).await
    }

    async fn find(&self, user_id: Uuid) -> UseCaseResult<Option<Subscription>> {
        self.subscription_repo
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to load subscription");
                BillingError::Internal(err)
            })
    }

    async fn require(&self, user_id: Uuid) -> UseCaseResult<Subscription> {
        self.find(user_id).await?.ok_or_else(|| {
            warn!(%user_id, "subscriptions: no subscription");
            BillingError::SubscriptionNotFound
        })
    }

    async fn find_by_provider_id(
        &self,
        provider_subscription_id: &str,
    ) -> UseCaseResult<Option<Subscription>> {
        self.subscription_repo
            .find_by_provider_subscription_id(provider_subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %provider_subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription by provider id"
                );
                BillingError::Internal(err)
            })
    }

    async fn save(&self, subscription: &Subscription) -> UseCaseResult<()> {
        self.subscription_repo.save(subscription).await.map_err(|err| {
            error!(
                user_id = %subscription.user_id,
                db_error = ?err,
                "subscriptions: failed to save subscription"
            );
            BillingError::Internal(err)
        })
    }
}

fn timestamp(ts: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(ts, 0).single()
}
