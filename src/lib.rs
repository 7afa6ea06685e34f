//! Portfolio Tracker - asset and user records over HTTP
//!
//! A small CRUD service with pluggable storage: every handler talks to
//! repository traits, backed either by in-memory stores or by a relational
//! database through SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities and creation payloads
//! - **infra**: Repository traits, storage backends, database and migrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Asset, NewAsset, NewUser, Password, User, UserResponse};
pub use errors::{AppError, AppResult};
pub use infra::{AssetRepository, RepoError, UserRepository};
