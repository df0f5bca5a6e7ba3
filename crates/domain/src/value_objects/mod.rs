pub mod birth_dates;
pub mod clients;
pub mod cpf;
pub mod creators;
pub mod emails;
pub mod enums;
pub mod errors;
pub mod pagination;
pub mod passwords;
pub mod phones;
pub mod sessions;
pub mod subscriptions;
pub mod users;
