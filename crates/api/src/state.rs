use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coursehub_db::DbPool,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Payment gateway HTTP client.
    pub gateway: Arc<PaymentGateway>,
}
