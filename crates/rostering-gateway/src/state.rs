//! Shared application state.

use std::sync::Arc;

use crate::gateway::Gateway;

/// Shared application state.
pub struct AppState {
    /// The reply pipeline, built once at startup.
    pub gateway: Gateway,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(gateway: Gateway) -> Arc<Self> {
        Arc::new(Self { gateway })
    }
}
