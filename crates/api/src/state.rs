use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). Everything here is read-only after startup; requests share
/// no mutable in-process state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskhive_db::DbPool,
    /// Server configuration, including the JWT signing secret.
    pub config: Arc<ServerConfig>,
}
