//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

use types::IntegrationConfigDoc;

impl IntegrationConfig {
    /// Load configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON; everything else is
    /// parsed as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        debug!(
            "loaded configuration '{}' ({} sets, {} integrations)",
            config.name,
            config.integrations.len(),
            config.integration_count()
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: IntegrationConfigDoc = serde_yaml::from_str(yaml)?;
        let config: IntegrationConfig = doc.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: IntegrationConfigDoc = serde_json::from_str(json)?;
        let config: IntegrationConfig = doc.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to YAML.
    ///
    /// Defaults applied during parsing (integration names, fetch and batch
    /// sizes) are written out; a document that omitted them does not
    /// round-trip byte-for-byte.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// Compute a SHA256 fingerprint of the configuration.
    pub fn hash(&self) -> String {
        let yaml = serde_yaml::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(yaml.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Total number of integrations across all sets.
    pub fn integration_count(&self) -> usize {
        self.integrations.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    const VALID_YAML: &str = r#"
name: example-integrations
description: copy orders into the warehouse
integrations:
  nightly:
    - name: orders to warehouse
      source:
        name: orders-db
        url: jdbc:postgresql://localhost:5432/orders
        driver: org.postgresql.Driver
        username: reader
        password: secret
      destination:
        name: warehouse
        url: jdbc:postgresql://warehouse:5432/analytics
        driver: org.postgresql.Driver
        username: loader
        password: secret
        write_mode: append
"#;

    #[test]
    fn test_from_yaml() {
        let config = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        assert_eq!(config.name, "example-integrations");
        assert_eq!(config.integration_count(), 1);

        let integration = &config.integrations["nightly"][0];
        assert_eq!(integration.name(), "orders to warehouse");
        assert_eq!(integration.source().fetch_size, 20_000);
        assert_eq!(integration.destination().write_mode, WriteMode::Append);
    }

    #[test]
    fn test_from_yaml_defaults_integration_name() {
        let yaml = r#"
name: example-integrations
integrations:
  nightly:
    - source:
        name: orders-db
        url: jdbc:postgresql://localhost:5432/orders
        driver: org.postgresql.Driver
      destination:
        name: warehouse
        url: jdbc:postgresql://warehouse:5432/analytics
        driver: org.postgresql.Driver
"#;
        let config = IntegrationConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.integrations["nightly"][0].name(),
            "Unnamed Integration"
        );
    }

    #[test]
    fn test_missing_destination_is_a_field_error() {
        let yaml = r#"
name: broken
integrations:
  nightly:
    - source:
        name: orders-db
        url: jdbc:postgresql://localhost:5432/orders
        driver: org.postgresql.Driver
"#;
        let err = IntegrationConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("destination")));
    }

    #[test]
    fn test_missing_config_name_is_a_field_error() {
        let yaml = r#"
integrations:
  nightly: []
"#;
        let err = IntegrationConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("name")));
    }

    #[test]
    fn test_unparseable_yaml_is_malformed() {
        let err = IntegrationConfig::from_yaml("integrations: [broken").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_json() {
        let config = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        let json = config.to_json().unwrap();
        let reparsed = IntegrationConfig::from_json(&json).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        let reparsed = IntegrationConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_load_dispatches_on_extension() {
        let config = IntegrationConfig::from_yaml(VALID_YAML).unwrap();

        let mut yaml_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml_file.write_all(VALID_YAML.as_bytes()).unwrap();
        assert_eq!(IntegrationConfig::load(yaml_file.path()).unwrap(), config);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file
            .write_all(config.to_json().unwrap().as_bytes())
            .unwrap();
        assert_eq!(IntegrationConfig::load(json_file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = IntegrationConfig::load("no_such_config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        let a = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        let b = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        assert_eq!(a.hash(), b.hash());

        let mut c = IntegrationConfig::from_yaml(VALID_YAML).unwrap();
        c.description = "changed".to_string();
        assert_ne!(a.hash(), c.hash());
    }
}
