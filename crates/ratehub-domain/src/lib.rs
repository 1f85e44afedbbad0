//! Domain types shared across the ratehub workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod pagination;
pub mod role;

pub use pagination::{PageRequest, Sort};
pub use role::Role;
