//! HTTP request handlers.

pub mod asset_handler;
pub mod health_handler;
pub mod user_handler;

pub use asset_handler::asset_routes;
pub use health_handler::health;
pub use user_handler::user_routes;

use crate::errors::{AppError, AppResult};

/// Parse an identifier path segment.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|_| AppError::bad_request("invalid id format"))
}
