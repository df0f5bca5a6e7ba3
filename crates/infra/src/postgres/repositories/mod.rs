pub mod clients;
pub mod creators;
pub mod subscriptions;
pub mod users;
