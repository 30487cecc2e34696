//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// Name given to an integration when the document supplies none.
pub const DEFAULT_INTEGRATION_NAME: &str = "Unnamed Integration";

/// A named data-movement task: one source endpoint paired with one
/// destination endpoint.
///
/// The value is immutable once constructed. If the document omits `name`
/// the integration is named [`DEFAULT_INTEGRATION_NAME`]; an explicitly
/// supplied empty string is kept verbatim (only absence triggers the
/// default, and only once, at construction). A document without a `name`
/// key therefore round-trips with the default written out - absence is
/// not preserved on re-serialization.
///
/// Equality and hashing are structural over all three fields, so
/// integrations can be used as map keys or set members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntegrationDoc")]
pub struct Integration {
    name: String,
    source: Datasource,
    destination: Destination,
}

impl Integration {
    /// Create an integration. `None` for `name` applies the default name.
    pub fn new(name: Option<String>, source: Datasource, destination: Destination) -> Self {
        Self {
            name: name.unwrap_or_else(|| DEFAULT_INTEGRATION_NAME.to_string()),
            source,
            destination,
        }
    }

    /// The integration's logical name. Never absent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The endpoint data is read from.
    pub fn source(&self) -> &Datasource {
        &self.source
    }

    /// The endpoint data is written to.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integration{{name='{}', source={}, destination={}}}",
            self.name, self.source, self.destination
        )
    }
}

/// Wire form of [`Integration`].
///
/// All three keys are optional at the document layer so that a missing
/// `name` can be told apart from an empty one, and so missing endpoints
/// fail with a field-level error instead of a generic parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct IntegrationDoc {
    name: Option<String>,
    source: Option<Datasource>,
    destination: Option<Destination>,
}

impl TryFrom<IntegrationDoc> for Integration {
    type Error = ConfigError;

    fn try_from(doc: IntegrationDoc) -> Result<Self, Self::Error> {
        let source = doc.source.ok_or(ConfigError::MissingField("source"))?;
        let destination = doc
            .destination
            .ok_or(ConfigError::MissingField("destination"))?;
        Ok(Integration::new(doc.name, source, destination))
    }
}

/// An endpoint data is read from.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Datasource {
    /// Endpoint name, used to refer to the datasource in logs and output.
    pub name: String,

    /// Connection URL.
    pub url: String,

    /// Driver identifier (e.g. "org.postgresql.Driver").
    pub driver: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Rows fetched per round trip when reading.
    #[serde(default = "default_transfer_size")]
    pub fetch_size: u32,

    /// Whether file-backed sources carry a header row.
    #[serde(default)]
    pub header: bool,
}

// Debug is hand-written to keep credentials out of log output.
impl fmt::Debug for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Datasource")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("driver", &self.driver)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("fetch_size", &self.fetch_size)
            .field("header", &self.header)
            .finish()
    }
}

impl fmt::Display for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Datasource{{name={}, url={}, driver={}}}",
            self.name, self.url, self.driver
        )
    }
}

/// An endpoint data is written to.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    /// Endpoint name, used to refer to the destination in logs and output.
    pub name: String,

    /// Connection URL.
    pub url: String,

    /// Driver identifier.
    pub driver: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Rows written per batch.
    #[serde(default = "default_transfer_size")]
    pub batch_size: u32,

    /// Disposition when the target already holds data.
    #[serde(default)]
    pub write_mode: WriteMode,
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("driver", &self.driver)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("batch_size", &self.batch_size)
            .field("write_mode", &self.write_mode)
            .finish()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Destination{{name={}, url={}, driver={}, write_mode={}}}",
            self.name, self.url, self.driver, self.write_mode
        )
    }
}

/// Write disposition for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Append rows to existing data.
    Append,

    /// Replace existing data.
    #[default]
    Overwrite,

    /// Fail if the target already holds data.
    ErrorIfExists,

    /// Silently skip the write if the target already holds data.
    Ignore,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::Append => "append",
            WriteMode::Overwrite => "overwrite",
            WriteMode::ErrorIfExists => "error_if_exists",
            WriteMode::Ignore => "ignore",
        })
    }
}

/// Root configuration: named sets of integrations.
///
/// Deserialization goes through [`IntegrationConfig::from_yaml`] /
/// [`IntegrationConfig::from_json`] so that missing required keys surface
/// as [`ConfigError::MissingField`] rather than as parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationConfig {
    /// Configuration name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Integration sets, keyed by set name.
    pub integrations: BTreeMap<String, Vec<Integration>>,
}

/// Wire form of [`IntegrationConfig`].
#[derive(Debug, Deserialize)]
pub(crate) struct IntegrationConfigDoc {
    name: Option<String>,
    description: Option<String>,
    integrations: Option<BTreeMap<String, Vec<IntegrationDoc>>>,
}

impl TryFrom<IntegrationConfigDoc> for IntegrationConfig {
    type Error = ConfigError;

    fn try_from(doc: IntegrationConfigDoc) -> Result<Self, Self::Error> {
        let name = doc.name.ok_or(ConfigError::MissingField("name"))?;
        let integrations = doc
            .integrations
            .ok_or(ConfigError::MissingField("integrations"))?;

        let integrations = integrations
            .into_iter()
            .map(|(set, docs)| {
                let converted = docs
                    .into_iter()
                    .map(Integration::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((set, converted))
            })
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;

        Ok(IntegrationConfig {
            name,
            description: doc.description.unwrap_or_default(),
            integrations,
        })
    }
}

fn default_transfer_size() -> u32 {
    20_000
}
