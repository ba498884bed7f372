//! Manager configuration loaded from environment variables.

/// Configuration for the order manager with sensible defaults.
///
/// Reads from environment variables:
/// - `MAX_COMMIT_RETRIES` — retries after a version conflict (default: `5`)
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub max_commit_retries: u32,
}

impl ManagerConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            max_commit_retries: std::env::var("MAX_COMMIT_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: 5,
        }
    }
}
