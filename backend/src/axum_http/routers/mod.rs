use application::usercases::{creators::CreatorUseCase, subscriptions::BillingUseCase};
use infra::{
    payments::stripe_client::StripeClient,
    postgres::repositories::{creators::CreatorPostgres, subscriptions::SubscriptionPostgres},
    receita_federal::hub_dev::HubDevClient,
};

pub mod access;
pub mod auth;
pub mod clients;
pub mod creators;
pub mod subscriptions;

pub type Billing = BillingUseCase<SubscriptionPostgres, StripeClient>;
pub type Creators =
    CreatorUseCase<CreatorPostgres, SubscriptionPostgres, HubDevClient, StripeClient>;
