//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod curse_service;
pub mod pagination;

pub use curse_service::CurseService;
pub use pagination::{Meta, PaginatorConfig};
