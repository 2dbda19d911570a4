//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod curse;

pub use curse::{parse_date, Curse, CurseChanges, CurseFilter, CurseId, NewCurse, DATE_FORMAT};
