//! Local libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "fitgen.db".to_string()
}

/// Default `PRAGMA busy_timeout`, in milliseconds.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "fitgen.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
    }
}
