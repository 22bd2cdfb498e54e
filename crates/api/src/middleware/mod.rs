//! Per-request middleware.
//!
//! - [`auth`] -- bearer-token authentication gate producing a [`auth::Principal`].

pub mod auth;
