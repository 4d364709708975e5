//! Application-wide constants

/// One hour.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const MIN_SECRET_LENGTH: usize = 32;
pub const DEFAULT_LOG_LEVEL: &str = "info";
