//! Transcoder configuration.
//!
//! Every setting has a default, so an empty file (or no file at all) gives
//! the behavior expected by existing configurations.
//!
//! # Example
//!
//! ```toml
//! temporary_id_prefix = "#"
//! quantity_presence = "explicit"
//! default_currency = "USD"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

/// How a product set's quantity fields are told apart from "not supplied".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityPresence {
    /// A quantity of zero counts as unset. Encode writes all three quantity
    /// fields, filling the unused ones with zero.
    #[default]
    ZeroIsUnset,
    /// Presence of the key decides, so an exact quantity of zero is kept.
    /// Encode writes only the fields the rule carries.
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscoderConfig {
    /// Marker that begins every identifier not yet assigned by the store.
    pub temporary_id_prefix: String,
    pub quantity_presence: QuantityPresence,
    /// ISO 4217 code given to amounts in the flat item and discount forms,
    /// which carry no currency of their own.
    pub default_currency: String,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        TranscoderConfig {
            temporary_id_prefix: "#".to_string(),
            quantity_presence: QuantityPresence::ZeroIsUnset,
            default_currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse transcoder config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("temporary_id_prefix must not be empty")]
    EmptyPrefix,

    #[error("default_currency '{0}' is not a three-letter currency code")]
    InvalidCurrency(String),
}

// ── Functions ─────────────────────────────────────────────────────────────────

impl TranscoderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TranscoderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.temporary_id_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        let code = &self.default_currency;
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidCurrency(code.clone()));
        }
        Ok(())
    }

    pub fn is_temporary_id(&self, id: &str) -> bool {
        id.is_empty() || id.starts_with(&self.temporary_id_prefix)
    }
}
