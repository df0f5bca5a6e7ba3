pub mod password_hasher;
pub mod payments;
pub mod tax_id;
