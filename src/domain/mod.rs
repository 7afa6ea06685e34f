//! Domain layer - Core business entities.
//!
//! Plain records returned by the repositories and the creation payloads
//! accepted by them. Nothing in here knows about HTTP or SQL.

pub mod asset;
pub mod password;
pub mod user;

pub use asset::{Asset, NewAsset};
pub use password::Password;
pub use user::{NewUser, User, UserResponse};
