use std::sync::Arc;

use chrono::Utc;
use domain::{
    entities::{creators::Creator, subscriptions::Subscription},
    repositories::{creators::CreatorRepository, subscriptions::SubscriptionRepository},
    value_objects::{creators::CreatorDto, errors::ValidationError},
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::interfaces::{payments::PaymentGateway, tax_id::TaxIdVerifier};

#[derive(Debug, Error)]
pub enum CreatorError {
    #[error("creator already exists")]
    AlreadyExists,
    #[error("creator not found")]
    NotFound,
    #[error("failed to validate CPF")]
    VerificationFailed { retryable: bool },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, CreatorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCreatorInput {
    pub name: String,
    pub cpf: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSettings {
    pub price_id: String,
    pub trial_days: i64,
}

pub struct CreatorUseCase<C, S, V, P>
where
    C: CreatorRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    creator_repo: Arc<C>,
    subscription_repo: Arc<S>,
    tax_id_verifier: Arc<V>,
    payment_gateway: Arc<P>,
    trial: TrialSettings,
}

impl<C, S, V, P> CreatorUseCase<C, S, V, P>
where
    C: CreatorRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    V: TaxIdVerifier + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
{
    pub fn new(
        creator_repo: Arc<C>,
        subscription_repo: Arc<S>,
        tax_id_verifier: Arc<V>,
        payment_gateway: Arc<P>,
        trial: TrialSettings,
    ) -> Self {
        Self {
            creator_repo,
            subscription_repo,
            tax_id_verifier,
            payment_gateway,
            trial,
        }
    }

    /// Registers the creator profile of `user_id` and opens its trial.
    pub async fn create_creator(
        &self,
        user_id: Uuid,
        input: CreateCreatorInput,
    ) -> UseCaseResult<CreatorDto> {
        let candidate = Creator::new(
            user_id,
            &input.name,
            &input.cpf,
            &input.birth_date,
            &input.email,
            &input.phone,
        )?;

        let existing_profile = self
            .creator_repo
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "creators: failed to load creator by user");
                CreatorError::Internal(err)
            })?;
        let existing_cpf = self
            .creator_repo
            .find_by_cpf(candidate.cpf())
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "creators: failed to load creator by CPF");
                CreatorError::Internal(err)
            })?;
        if existing_profile.is_some() || existing_cpf.is_some() {
            warn!(%user_id, "creators: creator already exists");
            return Err(CreatorError::AlreadyExists);
        }

        let lookup = self
            .tax_id_verifier
            .consult_cpf(candidate.cpf(), candidate.birth_date())
            .await
            .map_err(|err| {
                warn!(%user_id, error = %err, "creators: CPF verification failed");
                CreatorError::VerificationFailed {
                    retryable: err.is_retryable(),
                }
            })?;

        let creator = Creator::from_values(
            user_id,
            &lookup.name,
            candidate.cpf().clone(),
            candidate.birth_date(),
            candidate.contact().clone(),
        )?;

        self.creator_repo.create(&creator).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "creators: failed to create creator");
            CreatorError::Internal(err)
        })?;
        info!(%user_id, creator_id = %creator.id(), "creators: creator created");

        self.start_trial(&creator).await?;

        Ok(CreatorDto::from(&creator))
    }

    pub async fn get_by_user_id(&self, user_id: Uuid) -> UseCaseResult<CreatorDto> {
        let creator = self
            .creator_repo
            .find_by_user_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "creators: failed to load creator by user");
                CreatorError::Internal(err)
            })?
            .ok_or(CreatorError::NotFound)?;

        Ok(CreatorDto::from(&creator))
    }

    // The local trial must be stored. Payment gateway failures are only logged.
    async fn start_trial(&self, creator: &Creator) -> UseCaseResult<()> {
        let user_id = creator.user_id();
        let now = Utc::now();

        let mut subscription =
            Subscription::start_trial(user_id, &self.trial.price_id, self.trial.trial_days, now)
                .map_err(|err| {
                    error!(%user_id, error = %err, "creators: invalid trial settings");
                    CreatorError::Internal(anyhow::Error::new(err))
                })?;

        self.subscription_repo
            .create(&subscription)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "creators: failed to store trial subscription");
                CreatorError::Internal(err)
            })?;
        info!(%user_id, trial_days = self.trial.trial_days, "creators: trial started");

        let customer_id = match self
            .payment_gateway
            .create_customer(creator.contact().email().value(), creator.name(), user_id)
            .await
        {
            Ok(customer_id) => customer_id,
            Err(err) => {
                warn!(%user_id, error = ?err, "creators: failed to create payment customer");
                return Ok(());
            }
        };

        let provider_subscription_id = match self
            .payment_gateway
            .create_trial_subscription(&customer_id, &self.trial.price_id, self.trial.trial_days)
            .await
        {
            Ok(subscription_id) => subscription_id,
            Err(err) => {
                warn!(
                    %user_id,
                    %customer_id,
                    error = ?err,
                    "creators: failed to create provider trial subscription"
                );
                return Ok(());
            }
        };

        subscription.link_provider(&customer_id, &provider_subscription_id, Utc::now());
        if let Err(err) = self.subscription_repo.save(&subscription).await {
            error!(
                %user_id,
                %provider_subscription_id,
                db_error = ?err,
                "creators: failed to link provider subscription"
            );
        }

        Ok(())
    }
}
