//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod curse_repo;


use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

pub use curse_repo::PostgresCurseRepository;

const SCHEMA: &str = include_str!("../../../migrations/001_create_curses.sql");

/// Create the `curses` table and its index if they don't exist yet
pub async fn apply_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(SCHEMA).await?;
    Ok(())
}
