//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod curses;

pub use curses::{create_curse, delete_curse, get_curse, list_curses, update_curse};
