//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither the config nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Response header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Authentication & Security
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Development-only JWT secret used when none is configured in debug builds
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Default access token lifetime
pub const DEFAULT_ACCESS_TOKEN_TTL: &str = "15m";

/// Default refresh token lifetime
pub const DEFAULT_REFRESH_TOKEN_TTL: &str = "720h";

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default time allowed for in-flight requests after a shutdown signal
pub const DEFAULT_SHUTDOWN_TIMEOUT: &str = "5s";

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

// =============================================================================
// Database
// =============================================================================

/// Default maximum number of pooled connections
pub const DEFAULT_MAX_OPEN_CONNS: u32 = 10;

/// Default number of connections kept open while idle
pub const DEFAULT_MAX_IDLE_CONNS: u32 = 2;

/// Default maximum lifetime of a pooled connection
pub const DEFAULT_CONN_MAX_LIFETIME: &str = "30m";

/// Unique constraint guarding user emails (named in the users migration)
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

// =============================================================================
// Entity names (used in not-found messages)
// =============================================================================

pub const ENTITY_ASSET: &str = "asset";

pub const ENTITY_USER: &str = "user";
