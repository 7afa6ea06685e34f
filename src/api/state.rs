//! Application state - Dependency injection container.
//!
//! Stores are constructed once at startup and shared with every handler
//! through this state; handlers only see the repository traits.

use std::sync::Arc;

use crate::infra::{
    AssetRepository, Database, InMemoryAssetStore, InMemoryUserStore, UserRepository,
};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Asset storage backend
    pub assets: Arc<dyn AssetRepository>,
    /// User storage backend
    pub users: Arc<dyn UserRepository>,
    /// Database connection, present only for the relational backend
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state with injected repositories.
    pub fn new(assets: Arc<dyn AssetRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            assets,
            users,
            database: None,
        }
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAssetStore::new()),
            Arc::new(InMemoryUserStore::new()),
        )
    }

    /// Attach the database so health checks can ping it.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
