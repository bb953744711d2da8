//! Store configuration
//!
//! Backend connection settings come from the environment. Both the endpoint
//! URL and the access key must be present and non-empty for backend mode;
//! otherwise the process runs against the seeded in-memory fallback.

/// Environment variable holding the backend endpoint URL.
pub const BACKEND_URL_VAR: &str = "TASKTABS_BACKEND_URL";
/// Environment variable holding the backend access key.
pub const BACKEND_KEY_VAR: &str = "TASKTABS_BACKEND_KEY";

/// Connection settings for the data-access facade.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            backend_url: read_var(BACKEND_URL_VAR),
            api_key: read_var(BACKEND_KEY_VAR),
        }
    }

    /// Backend connection parameters, if fully configured.
    pub fn backend(&self) -> Option<(&str, &str)> {
        match (self.backend_url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
