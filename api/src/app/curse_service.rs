//! Curse service
//!
//! Validates curse input, enforces the start/end date ordering and delegates
//! persistence to a `CurseRepository`.

use std::sync::Arc;

use crate::domain::entities::{parse_date, Curse, CurseChanges, CurseFilter, CurseId, NewCurse};
use crate::domain::ports::CurseRepository;
use crate::error::{DateField, DomainError};

/// Service for managing curses
pub struct CurseService<CR>
where
    CR: CurseRepository,
{
    curses: Arc<CR>,
}

impl<CR> CurseService<CR>
where
    CR: CurseRepository,
{
    pub fn new(curses: Arc<CR>) -> Self {
        Self { curses }
    }

    /// Create a curse from raw input.
    ///
    /// Fails with `RequiredFieldMissing` for blank input, `InvalidDate` for
    /// unparsable dates and `DateOrderViolation` when start is after end.
    /// Nothing is written unless all checks pass.
    pub async fn create(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Curse, DomainError> {
        require("name", name)?;
        require("start date", start_date)?;
        require("end date", end_date)?;

        let start_date = parse_date(DateField::Start, start_date).inspect_err(log_rejection)?;
        let end_date = parse_date(DateField::End, end_date).inspect_err(log_rejection)?;

        if start_date > end_date {
            let err = DomainError::DateOrderViolation;
            log_rejection(&err);
            return Err(err);
        }

        let curse = self
            .curses
            .create(&NewCurse {
                name: name.to_string(),
                start_date,
                end_date,
            })
            .await?;

        Ok(curse)
    }

    /// List curses matching the filter, newest first
    pub async fn get_all(
        &self,
        filter: &CurseFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Curse>, DomainError> {
        self.curses.find_all(filter, offset, limit).await
    }

    /// Get a curse by ID
    pub async fn get_by_id(&self, id: &CurseId) -> Result<Curse, DomainError> {
        self.curses.find_by_id(id).await
    }

    /// Partially update a curse.
    ///
    /// A supplied date is validated against the *stored* opposite date. When
    /// both dates are supplied they are not compared with each other.
    pub async fn update(
        &self,
        id: &CurseId,
        name: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<(), DomainError> {
        if let Some(name) = name {
            require("name", name)?;
        }
        if let Some(start_date) = start_date {
            require("start date", start_date)?;
        }
        if let Some(end_date) = end_date {
            require("end date", end_date)?;
        }

        let current = self.curses.find_by_id(id).await?;
        let mut changes = CurseChanges {
            name: name.map(str::to_string),
            ..Default::default()
        };

        if let Some(raw) = start_date {
            let date = parse_date(DateField::Start, raw).inspect_err(log_rejection)?;
            if date > current.end_date {
                let err = DomainError::DateOrderViolation;
                log_rejection(&err);
                return Err(err);
            }
            changes.start_date = Some(date);
        }

        if let Some(raw) = end_date {
            let date = parse_date(DateField::End, raw).inspect_err(log_rejection)?;
            if current.start_date > date {
                let err = DomainError::DateOrderViolation;
                log_rejection(&err);
                return Err(err);
            }
            changes.end_date = Some(date);
        }

        if changes.is_empty() {
            tracing::debug!(curse_id = %id, "Update with no fields, nothing to write");
            return Ok(());
        }

        self.curses.update(id, &changes).await
    }

    /// Delete a curse
    pub async fn delete(&self, id: &CurseId) -> Result<(), DomainError> {
        self.curses.delete(id).await
    }

    /// Count curses matching the filter
    pub async fn count(&self, filter: &CurseFilter) -> Result<u64, DomainError> {
        self.curses.count(filter).await
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::RequiredFieldMissing(field));
    }
    Ok(())
}

fn log_rejection(err: &DomainError) {
    tracing::debug!(error = %err, "Rejected curse input");
}
