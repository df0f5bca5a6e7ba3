use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::postgres::schema::subscriptions;
use domain::{
    entities::subscriptions::Subscription,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: String,
    pub trial_start_date: DateTime<Utc>,
    pub trial_end_date: DateTime<Utc>,
    pub is_trial_active: bool,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub status: String,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub origin: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionEntity {
    pub fn to_domain(self) -> Subscription {
        let status = SubscriptionStatus::parse(&self.status).unwrap_or_else(|| {
            warn!(
                subscription_id = %self.id,
                status = %self.status,
                "subscriptions: unknown stored status, treating as inactive"
            );
            SubscriptionStatus::Inactive
        });

        Subscription {
            id: self.id,
            user_id: self.user_id,
            plan_id: self.plan_id,
            trial_start_date: self.trial_start_date,
            trial_end_date: self.trial_end_date,
            is_trial_active: self.is_trial_active,
            customer_id: self.customer_id,
            subscription_id: self.subscription_id,
            status,
            subscription_end_date: self.subscription_end_date,
            origin: self.origin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Subscription> for SubscriptionEntity {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            plan_id: subscription.plan_id.clone(),
            trial_start_date: subscription.trial_start_date,
            trial_end_date: subscription.trial_end_date,
            is_trial_active: subscription.is_trial_active,
            customer_id: subscription.customer_id.clone(),
            subscription_id: subscription.subscription_id.clone(),
            status: subscription.status.to_string(),
            subscription_end_date: subscription.subscription_end_date,
            origin: subscription.origin.clone(),
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}
