use chrono::{DateTime, Utc};
use serde::Serialize;

use super::enums::{access_statuses::AccessStatus, subscription_statuses::SubscriptionStatus};
use crate::entities::subscriptions::Subscription;

/// What the dashboard shows about a creator's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionStatusDto {
    pub access: AccessStatus,
    pub subscription_status: SubscriptionStatus,
    pub is_trial_active: bool,
    pub days_left_in_trial: i64,
    pub days_left_in_subscription: i64,
    pub trial_end_date: Option<DateTime<Utc>>,
    pub subscription_end_date: Option<DateTime<Utc>>,
}

impl SubscriptionStatusDto {
    pub fn from_subscription(subscription: &Subscription, now: DateTime<Utc>) -> Self {
        Self {
            access: subscription.access_status_at(now),
            subscription_status: subscription.status,
            is_trial_active: subscription.is_in_trial_period_at(now),
            days_left_in_trial: subscription.days_left_in_trial_at(now),
            days_left_in_subscription: subscription.days_left_in_subscription_at(now),
            trial_end_date: Some(subscription.trial_end_date),
            subscription_end_date: subscription.subscription_end_date,
        }
    }

    /// For users that never started a trial.
    pub fn none() -> Self {
        Self {
            access: AccessStatus::Inactive,
            subscription_status: SubscriptionStatus::Inactive,
            is_trial_active: false,
            days_left_in_trial: 0,
            days_left_in_subscription: 0,
            trial_end_date: None,
            subscription_end_date: None,
        }
    }
}
