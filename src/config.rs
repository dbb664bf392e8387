//! Service Configuration

use serde::{Deserialize, Serialize};

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Path of the serialized model artifact.
    pub model_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            model_path: "model/forest.json".into(),
        }
    }
}

impl ServiceConfig {
    /// Read `URLGUARD_LISTEN` and `URLGUARD_MODEL`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("URLGUARD_LISTEN").unwrap_or(defaults.listen_addr),
            model_path: std::env::var("URLGUARD_MODEL").unwrap_or(defaults.model_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.model_path, "model/forest.json");
    }
}
