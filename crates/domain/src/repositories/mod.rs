pub mod clients;
pub mod creators;
pub mod errors;
pub mod sessions;
pub mod subscriptions;
pub mod users;
