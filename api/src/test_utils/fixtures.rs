//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{Curse, CurseId};

/// Create a test curse running from January to June 2024
pub fn test_curse(name: &str) -> Curse {
    test_curse_with_dates(
        name,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    )
}

/// Create a test curse with specific dates
pub fn test_curse_with_dates(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Curse {
    let now = Utc::now();
    Curse {
        id: CurseId::new(),
        name: name.to_string(),
        start_date,
        end_date,
        created_at: now,
        updated_at: now,
    }
}
