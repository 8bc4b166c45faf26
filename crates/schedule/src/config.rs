use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "schedule.db")
    pub sqlite_path: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "schedule.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "schedule.db".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
