//! Process-wide index configuration.
//!
//! Loaded once at startup (usually from a `dynidx.toml`) and passed by
//! reference to every entity and registry built from it.

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Namespace prefixed to every table name when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dynidx";

/// Read capacity used when an index does not override it.
pub const DEFAULT_READ_CAPACITY: u64 = 100;

/// Write capacity used when an index does not override it.
pub const DEFAULT_WRITE_CAPACITY: u64 = 20;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },
}

impl ConfigError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Io { .. } => ErrorClass::Internal,
            Self::Parse(_) | Self::ZeroCapacity { .. } => ErrorClass::Unsupported,
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(err.class(), ErrorOrigin::Config, err.to_string())
    }
}

///
/// IndexConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Prefix for every table name, joined with `_`.
    pub namespace: String,
    /// Default provisioned read capacity for tables and global indexes.
    pub read_capacity: u64,
    /// Default provisioned write capacity for tables and global indexes.
    pub write_capacity: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            read_capacity: DEFAULT_READ_CAPACITY,
            write_capacity: DEFAULT_WRITE_CAPACITY,
        }
    }
}

impl IndexConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    const fn validate(&self) -> Result<(), ConfigError> {
        if self.read_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "read_capacity",
            });
        }
        if self.write_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "write_capacity",
            });
        }

        Ok(())
    }
}

///
/// TESTS
///
