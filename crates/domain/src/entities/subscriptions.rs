use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::enums::{
    access_statuses::AccessStatus, subscription_statuses::SubscriptionStatus,
};

pub const DEFAULT_TRIAL_DAYS: i64 = 7;
pub const EXPIRING_SOON_DAYS: i64 = 10;
pub const WEB_ORIGIN: &str = "web";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("invalid ID")]
    InvalidId,
    #[error("invalid user ID")]
    InvalidUserId,
    #[error("invalid plan ID")]
    InvalidPlanId,
    #[error("invalid trial start date")]
    InvalidTrialStartDate,
    #[error("invalid trial end date")]
    InvalidTrialEndDate,
    #[error("invalid customer ID")]
    InvalidCustomerId,
    #[error("invalid subscription ID")]
    InvalidSubscriptionId,
    #[error("invalid origin")]
    InvalidOrigin,
    #[error("invalid created at timestamp")]
    InvalidCreatedAt,
    #[error("invalid updated at timestamp")]
    InvalidUpdatedAt,
}

/// Input for a fully provisioned subscription, e.g. one mirrored from the payment provider.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: String,
    pub trial_start_date: DateTime<Utc>,
    pub trial_end_date: DateTime<Utc>,
    pub is_trial_active: bool,
    pub customer_id: String,
    pub subscription_id: String,
    pub status: SubscriptionStatus,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub origin: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: String,
    pub trial_start_date: DateTime<Utc>,
    pub trial_end_date: DateTime<Utc>,
    pub is_trial_active: bool,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub status: SubscriptionStatus,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub origin: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(input: NewSubscription) -> Result<Self, SubscriptionError> {
        if input.id.is_nil() {
            return Err(SubscriptionError::InvalidId);
        }
        if input.user_id.is_nil() {
            return Err(SubscriptionError::InvalidUserId);
        }
        if input.plan_id.trim().is_empty() {
            return Err(SubscriptionError::InvalidPlanId);
        }
        if is_zero(input.trial_start_date) {
            return Err(SubscriptionError::InvalidTrialStartDate);
        }
        if is_zero(input.trial_end_date) {
            return Err(SubscriptionError::InvalidTrialEndDate);
        }
        if input.customer_id.trim().is_empty() {
            return Err(SubscriptionError::InvalidCustomerId);
        }
        if input.subscription_id.trim().is_empty() {
            return Err(SubscriptionError::InvalidSubscriptionId);
        }
        if input.origin.trim().is_empty() {
            return Err(SubscriptionError::InvalidOrigin);
        }
        if is_zero(input.created_at) {
            return Err(SubscriptionError::InvalidCreatedAt);
        }
        if is_zero(input.updated_at) {
            return Err(SubscriptionError::InvalidUpdatedAt);
        }
        if input.trial_end_date < input.trial_start_date {
            return Err(SubscriptionError::InvalidTrialEndDate);
        }

        Ok(Self {
            id: input.id,
            user_id: input.user_id,
            plan_id: input.plan_id,
            trial_start_date: input.trial_start_date,
            trial_end_date: input.trial_end_date,
            is_trial_active: input.is_trial_active,
            customer_id: Some(input.customer_id),
            subscription_id: Some(input.subscription_id),
            status: input.status,
            subscription_end_date: input.subscription_end_date,
            origin: input.origin,
            created_at: input.created_at,
            updated_at: input.updated_at,
        })
    }

    /// A local trial that is not linked to the payment provider yet.
    pub fn start_trial(
        user_id: Uuid,
        plan_id: &str,
        trial_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, SubscriptionError> {
        if user_id.is_nil() {
            return Err(SubscriptionError::InvalidUserId);
        }
        if plan_id.trim().is_empty() {
            return Err(SubscriptionError::InvalidPlanId);
        }
        if trial_days < 0 {
            return Err(SubscriptionError::InvalidTrialEndDate);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            plan_id: plan_id.to_string(),
            trial_start_date: now,
            trial_end_date: now + Duration::days(trial_days),
            is_trial_active: true,
            customer_id: None,
            subscription_id: None,
            status: SubscriptionStatus::Trialing,
            subscription_end_date: None,
            origin: WEB_ORIGIN.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_in_trial_period(&self) -> bool {
        self.is_in_trial_period_at(Utc::now())
    }

    pub fn is_in_trial_period_at(&self, now: DateTime<Utc>) -> bool {
        self.is_trial_active && now < self.trial_end_date
    }

    pub fn days_left_in_trial(&self) -> i64 {
        self.days_left_in_trial_at(Utc::now())
    }

    pub fn days_left_in_trial_at(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.trial_end_date, now)
    }

    pub fn is_subscribed(&self) -> bool {
        self.is_subscribed_at(Utc::now())
    }

    pub fn is_subscribed_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active
            || self.subscription_end_date.is_some_and(|end| now < end)
    }

    pub fn days_left_in_subscription_at(&self, now: DateTime<Utc>) -> i64 {
        self.subscription_end_date
            .map(|end| days_until(end, now))
            .unwrap_or(0)
    }

    /// Ten days or fewer left on a dated subscription.
    pub fn is_expiring_soon_at(&self, now: DateTime<Utc>) -> bool {
        let days_left = self.days_left_in_subscription_at(now);
        days_left > 0 && days_left <= EXPIRING_SOON_DAYS
    }

    pub fn access_status(&self) -> AccessStatus {
        self.access_status_at(Utc::now())
    }

    pub fn access_status_at(&self, now: DateTime<Utc>) -> AccessStatus {
        if self.is_in_trial_period_at(now) {
            return AccessStatus::Trial;
        }
        if self.is_subscribed_at(now) {
            if self.is_expiring_soon_at(now) {
                return AccessStatus::Expiring;
            }
            return AccessStatus::Active;
        }
        AccessStatus::Inactive
    }

    pub fn cancel_subscription(&mut self) {
        self.cancel_subscription_at(Utc::now());
    }

    pub fn cancel_subscription_at(&mut self, now: DateTime<Utc>) {
        self.status = SubscriptionStatus::Canceled;
        self.updated_at = now;
    }

    pub fn end_trial(&mut self) {
        self.end_trial_at(Utc::now());
    }

    pub fn end_trial_at(&mut self, now: DateTime<Utc>) {
        self.is_trial_active = false;
        self.updated_at = now;
    }

    /// Records the provider identifiers without changing the billing status.
    pub fn link_provider(&mut self, customer_id: &str, subscription_id: &str, now: DateTime<Utc>) {
        self.customer_id = Some(customer_id.to_string());
        self.subscription_id = Some(subscription_id.to_string());
        self.updated_at = now;
    }

    pub fn activate(&mut self, customer_id: &str, subscription_id: &str, now: DateTime<Utc>) {
        self.link_provider(customer_id, subscription_id, now);
        self.status = SubscriptionStatus::Active;
    }

    pub fn update_status(
        &mut self,
        status: SubscriptionStatus,
        end_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.status = status;
        self.subscription_end_date = end_date;
        self.updated_at = now;
    }
}

fn is_zero(at: DateTime<Utc>) -> bool {
    at == DateTime::<Utc>::UNIX_EPOCH
}

// Whole days rounded up, never negative.
fn days_until(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (end - now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + 86_399) / 86_400
}
