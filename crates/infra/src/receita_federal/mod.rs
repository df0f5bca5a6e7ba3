pub mod hub_dev;
