//! Framework-free domain layer shared by the database and API crates.

pub mod error;
pub mod ownership;
pub mod types;
