use crate::error::{BnError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_INDENT_SIZE: usize = 2;
pub const MAX_INDENT_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaunifiConfig {
    pub server: ServerConfig,
    pub format: FormatConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Indent used when a caller does not pass `indent_size`.
    pub indent_size: usize,
    /// Upper bound on the size of a single `code` argument.
    pub max_input_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "beaunifi".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            host: "127.0.0.1".into(),
            port: 8787,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
            max_input_bytes: 5 * 1024 * 1024,
        }
    }
}

impl BeaunifiConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BnError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Apply `BEAUNIFI_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("BEAUNIFI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BEAUNIFI_PORT") {
            self.server.port = parse_env("BEAUNIFI_PORT", &port)?;
        }
        if let Some(indent) = lookup("BEAUNIFI_INDENT_SIZE") {
            self.format.indent_size = parse_env("BEAUNIFI_INDENT_SIZE", &indent)?;
        }
        if let Some(limit) = lookup("BEAUNIFI_MAX_INPUT_BYTES") {
            self.format.max_input_bytes = parse_env("BEAUNIFI_MAX_INPUT_BYTES", &limit)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.format.indent_size > MAX_INDENT_SIZE {
            return Err(BnError::Config(format!(
                "indent_size must be at most {MAX_INDENT_SIZE}, got {}",
                self.format.indent_size
            )));
        }
        if self.format.max_input_bytes == 0 {
            return Err(BnError::Config("max_input_bytes must be positive".into()));
        }
        Ok(())
    }

    /// Extra checks for the HTTP transport.
    pub fn validate_http(&self) -> Result<()> {
        self.validate()?;
        if self.server.port == 0 {
            return Err(BnError::Config("port must be non-zero".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BnError::Config(format!("{key} has an invalid value: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = BeaunifiConfig::default();
        assert_eq!(cfg.format.indent_size, 2);
        assert_eq!(cfg.server.name, "beaunifi");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = BeaunifiConfig::from_toml_str("[format]\nindent_size = 4\n").unwrap();
        assert_eq!(cfg.format.indent_size, 4);
        assert_eq!(cfg.server.port, 8787);
        assert_eq!(cfg.format.max_input_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_bad_toml() {
        let err = BeaunifiConfig::from_toml_str("[format\n").unwrap_err();
        assert!(matches!(err, BnError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beaunifi.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 9000\n").unwrap();
        let cfg = BeaunifiConfig::from_file(&path).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BeaunifiConfig::from_file("/nonexistent/beaunifi.toml").unwrap_err();
        assert!(matches!(err, BnError::Io(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("BEAUNIFI_PORT", "9100"), ("BEAUNIFI_INDENT_SIZE", "4")]
            .into_iter()
            .collect();
        let mut cfg = BeaunifiConfig::default();
        cfg.apply_env_from(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.format.indent_size, 4);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_invalid_value() {
        let mut cfg = BeaunifiConfig::default();
        let err = cfg
            .apply_env_from(|k| (k == "BEAUNIFI_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("BEAUNIFI_PORT"));
    }

    #[test]
    fn test_validate_limits() {
        let mut cfg = BeaunifiConfig::default();
        cfg.format.indent_size = 17;
        assert!(cfg.validate().is_err());

        let mut cfg = BeaunifiConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_ok());
        assert!(cfg.validate_http().is_err());
    }
}
