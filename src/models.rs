pub mod account;
pub mod auth;
pub mod order;
pub mod product;
pub mod views;
