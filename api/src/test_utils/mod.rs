//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repository mirrors the PostgreSQL adapter's semantics
//! (filtering, ordering, not-found detection) so services and HTTP handlers
//! can be tested without a database.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
