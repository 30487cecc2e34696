//! Error types for the configuration library.

use thiserror::Error;

/// Main error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required document key was absent during deserialization.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Configuration parsed but failed validation.
    #[error("configuration error: {0}")]
    Invalid(String),

    /// The document could not be parsed as YAML.
    #[error("malformed YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document could not be parsed as JSON.
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a validation error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid(message.into())
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for CLI use.
    ///
    /// IO failures (unreadable file, missing file) map to 7, everything
    /// else to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::Io(_) => 7,
            _ => 1,
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
