pub mod admin;
pub mod auth;
pub mod owner;
pub mod transaction;
pub mod user;
