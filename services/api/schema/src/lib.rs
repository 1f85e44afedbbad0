//! sea-orm entities for the ratehub database.

pub mod ratings;
pub mod stores;
pub mod transactions;
pub mod users;
