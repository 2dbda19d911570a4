//! SeaORM table models

pub mod curses;
