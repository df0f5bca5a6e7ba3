pub mod auth;
pub mod clients;
pub mod creators;
pub mod subscriptions;
