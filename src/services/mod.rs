pub mod account;
pub mod ownership;
