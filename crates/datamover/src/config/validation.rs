//! Configuration validation.
//!
//! Integrations carry their endpoint descriptions verbatim; checks on
//! endpoint contents live here, in an explicit pass over the parsed
//! configuration, never in the value types themselves.

use super::{Datasource, Destination, IntegrationConfig};
use crate::error::{ConfigError, Result};

/// Validate the configuration.
pub fn validate(config: &IntegrationConfig) -> Result<()> {
    if config.name.is_empty() {
        return Err(ConfigError::invalid("configuration name is required"));
    }
    if config.integrations.is_empty() {
        return Err(ConfigError::invalid(
            "at least one integration set is required",
        ));
    }

    for (set, integrations) in &config.integrations {
        if integrations.is_empty() {
            return Err(ConfigError::invalid(format!(
                "integration set '{}' is empty",
                set
            )));
        }
        for integration in integrations {
            validate_source(set, integration.name(), integration.source())?;
            validate_destination(set, integration.name(), integration.destination())?;
        }
    }

    Ok(())
}

fn validate_source(set: &str, integration: &str, source: &Datasource) -> Result<()> {
    if source.name.is_empty() {
        return Err(field_error(set, integration, "source.name"));
    }
    if source.url.is_empty() {
        return Err(field_error(set, integration, "source.url"));
    }
    if source.driver.is_empty() {
        return Err(field_error(set, integration, "source.driver"));
    }
    if source.fetch_size == 0 {
        return Err(ConfigError::invalid(format!(
            "source.fetch_size must be at least 1 for '{}' in set '{}'",
            integration, set
        )));
    }
    Ok(())
}

fn validate_destination(set: &str, integration: &str, destination: &Destination) -> Result<()> {
    if destination.name.is_empty() {
        return Err(field_error(set, integration, "destination.name"));
    }
    if destination.url.is_empty() {
        return Err(field_error(set, integration, "destination.url"));
    }
    if destination.driver.is_empty() {
        return Err(field_error(set, integration, "destination.driver"));
    }
    if destination.batch_size == 0 {
        return Err(ConfigError::invalid(format!(
            "destination.batch_size must be at least 1 for '{}' in set '{}'",
            integration, set
        )));
    }
    Ok(())
}

fn field_error(set: &str, integration: &str, field: &str) -> ConfigError {
    ConfigError::invalid(format!(
        "{} is required for '{}' in set '{}'",
        field, integration, set
    ))
}
