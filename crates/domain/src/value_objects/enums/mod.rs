pub mod access_statuses;
pub mod subscription_statuses;
