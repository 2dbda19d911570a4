//! Domain layer
//!
//! Curse model and the storage port the service depends on.
//! - `entities`: curse records, partial updates, listing filters
//! - `ports`: repository trait implemented by the adapters

pub mod entities;
pub mod ports;
