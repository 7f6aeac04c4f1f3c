/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_limits")]
    pub limits: LimitSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Bounds on the work a single request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitSettings {
    /// Longest array accepted by `/api/sort` and `/api/random-array`
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,

    /// Largest value accepted in an array
    #[serde(default = "default_max_value")]
    pub max_value: u32,
}

impl LimitSettings {
    /// Reject arrays that are too long or hold values that are too large
    pub fn check_array(&self, array: &[u32]) -> Result<()> {
        self.check_len(array.len())?;
        array.iter().try_for_each(|&value| self.check_value(value))
    }

    pub fn check_value(&self, value: u32) -> Result<()> {
        if value > self.max_value {
            return Err(ServerError::BadRequest(format!(
                "value {} exceeds the maximum of {}",
                value, self.max_value
            )));
        }
        Ok(())
    }

    pub fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_array_len {
            return Err(ServerError::BadRequest(format!(
                "array length {} exceeds the maximum of {}",
                len, self.max_array_len
            )));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given, otherwise `config.toml` if it exists, then
    /// applies `SORTVIS_` environment overrides (`SORTVIS_SERVER__PORT`,
    /// `SORTVIS_LIMITS__MAX_ARRAY_LEN`, ...).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore since field names contain one
        settings = settings.add_source(
            config::Environment::with_prefix("SORTVIS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_array_len == 0 {
            return Err(ServerError::Config(
                "limits.max_array_len must be at least 1".to_string(),
            ));
        }

        if self.limits.max_value == 0 {
            return Err(ServerError::Config(
                "limits.max_value must be at least 1".to_string(),
            ));
        }

        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "server.host {:?} is not an IP address",
                self.server.host
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_limits() -> LimitSettings {
    LimitSettings {
        max_array_len: default_max_array_len(),
        max_value: default_max_value(),
    }
}

fn default_max_array_len() -> usize {
    100
}

fn default_max_value() -> u32 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            limits: default_limits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.limits.max_array_len, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limits_rejected() {
        let mut config = ServerConfig::default();
        config.limits.max_array_len = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        let mut config = ServerConfig::default();
        config.limits.max_value = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn bad_host_rejected() {
        let mut config = ServerConfig::default();
        config.server.host = "localhost:80".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn limits_check_arrays() {
        let limits = LimitSettings {
            max_array_len: 3,
            max_value: 10,
        };

        assert!(limits.check_array(&[1, 10, 5]).is_ok());
        assert!(limits.check_array(&[1, 2, 3, 4]).is_err());
        assert!(limits.check_array(&[11]).is_err());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: ServerConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[limits]\nmax_value = 50\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.limits.max_value, 50);
        assert_eq!(config.limits.max_array_len, 100);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
