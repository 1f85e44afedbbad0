//! Cross-cutting helpers shared by the ratehub services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
