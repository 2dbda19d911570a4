//! Curse domain entity
//!
//! A curse is a named course run with a start and an end date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DateField, DomainError};

/// Wire format for curse dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a curse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurseId(pub Uuid);

impl CurseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CurseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CurseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A stored curse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curse {
    pub id: CurseId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to create a new curse (already validated)
#[derive(Debug, Clone)]
pub struct NewCurse {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Columns to change in a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurseChanges {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CurseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Listing filter shared by the list and count queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurseFilter {
    /// Case-insensitive substring of the curse name. Empty means no filter.
    pub name: Option<String>,
}

impl CurseFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Lowercased name needle, or `None` when the filter is blank
    pub fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Only the zero-padded, four-digit-year form is accepted: the value must
/// format back to exactly the same string.
pub fn parse_date(field: DateField, value: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(invalid());
    }
    Ok(date)
}
