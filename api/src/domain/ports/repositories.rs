//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Curse, CurseChanges, CurseFilter, CurseId, NewCurse};
use crate::error::DomainError;

/// Repository for Curse entities
///
/// Absence is reported as `DomainError::NotFound`, every other storage
/// failure as `DomainError::Database`.
#[async_trait]
pub trait CurseRepository: Send + Sync {
    /// Insert a new curse, assigning its id and timestamps
    async fn create(&self, curse: &NewCurse) -> Result<Curse, DomainError>;

    /// List curses matching the filter, newest first
    async fn find_all(
        &self,
        filter: &CurseFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Curse>, DomainError>;

    /// Find a curse by ID
    async fn find_by_id(&self, id: &CurseId) -> Result<Curse, DomainError>;

    /// Write the supplied columns of a curse
    async fn update(&self, id: &CurseId, changes: &CurseChanges) -> Result<(), DomainError>;

    /// Delete a curse
    async fn delete(&self, id: &CurseId) -> Result<(), DomainError>;

    /// Count curses matching the filter (same predicate as `find_all`)
    async fn count(&self, filter: &CurseFilter) -> Result<u64, DomainError>;
}
