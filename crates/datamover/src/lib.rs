//! # datamover
//!
//! Configuration model for named data-movement integrations.
//!
//! A configuration file declares named sets of integrations; each
//! integration binds a logical name to a source endpoint and a destination
//! endpoint:
//!
//! - **Document formats**: YAML and JSON, with a stable serialization
//!   contract (absent integration names default to `"Unnamed Integration"`)
//! - **Field-level errors** for missing required keys
//! - **Post-parse validation** of endpoint descriptions
//! - **Fingerprinting** for change detection
//!
//! ## Example
//!
//! ```rust,no_run
//! use datamover::IntegrationConfig;
//!
//! fn main() -> datamover::Result<()> {
//!     let config = IntegrationConfig::load("config.yaml")?;
//!     println!("{} integrations", config.integration_count());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

// Re-exports for convenient access
pub use config::{
    Datasource, Destination, Integration, IntegrationConfig, WriteMode, DEFAULT_INTEGRATION_NAME,
};
pub use error::{ConfigError, Result};
