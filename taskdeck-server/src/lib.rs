//! Taskdeck server library.
//!
//! Exposes the task store and its HTTP surface for use in tests and
//! embedding. The server is a stateless CRUD service over a single
//! `tasks` table; all state lives in the database.

pub mod config;
pub mod http;
pub mod store;
