//! Infrastructure layer - External systems integration
//!
//! - Database connections and migrations
//! - Repository backends (in-memory and relational)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    AssetRepository, AssetStore, InMemoryAssetStore, InMemoryUserStore, RepoError, RepoResult,
    UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAssetRepository, MockUserRepository};
