//! Repository layer - Data access abstraction
//!
//! Each entity has a capability trait with two interchangeable backends:
//! an in-memory store and a relational store over SeaORM.

mod asset_repository;
mod constraint;
pub(crate) mod entities;
mod error;
mod memory;
mod user_repository;

pub use asset_repository::{AssetRepository, AssetStore};
pub use constraint::UniqueViolation;
pub use error::{RepoError, RepoResult};
pub use memory::{InMemoryAssetStore, InMemoryUserStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use asset_repository::MockAssetRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
