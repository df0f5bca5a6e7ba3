pub mod payments;
pub mod postgres;
pub mod receita_federal;
pub mod security;
pub mod sessions;
