pub mod clients;
pub mod contacts;
pub mod creators;
pub mod subscriptions;
pub mod users;
