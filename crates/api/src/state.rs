use std::sync::Arc;

use taskhub_db::store::Stores;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the stores are `Arc`-backed and the config is shared.
#[derive(Clone)]
pub struct AppState {
    /// Store handles (Postgres procedure store or in-memory).
    pub stores: Stores,
    pub config: Arc<ServerConfig>,
}
