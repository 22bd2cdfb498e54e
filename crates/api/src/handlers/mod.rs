//! HTTP handlers, one module per resource.

pub mod auth;
pub mod tasks;
pub mod users;
