//! Buffer configuration loading.

use std::path::Path;

use serde_json::Value;

use weir_core::config;
use weir_core::ConfigError;

/// Parameters for one storage tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierConfig {
    /// Size of the tier in capacity units.
    pub total_capacity: u64,
    /// Most units the tier admits per tick.
    pub rate_cap: u64,
}

/// Validated buffer parameters, loaded before any simulated time
/// advances.
///
/// The document shape is:
///
/// ```json
/// {
///   "buffer": {
///     "hot":  { "total_capacity": 500, "max_ingest_data_rate": 5 },
///     "cold": { "total_capacity": 250, "max_data_rate": 2 }
///   }
/// }
/// ```
///
/// The tier-specific rate keys (`max_ingest_data_rate` for hot,
/// `max_data_rate` for cold) both land in [`TierConfig::rate_cap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Hot-tier parameters.
    pub hot: TierConfig,
    /// Cold-tier parameters.
    pub cold: TierConfig,
}

impl BufferConfig {
    /// Load and validate a buffer configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] if the file is absent,
    /// [`ConfigError::Io`] if it cannot be read, and the
    /// [`from_json`](Self::from_json) errors for its content.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&config::read_text(path.as_ref())?)
    }

    /// Parse and validate buffer configuration text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::MissingField`] for an absent section or key,
    /// [`ConfigError::InvalidField`] for a wrongly-typed value.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let doc = config::parse_document(text)?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &Value) -> Result<Self, ConfigError> {
        let hot = TierConfig {
            total_capacity: config::require_u64(doc, "buffer.hot.total_capacity")?,
            rate_cap: config::require_u64(doc, "buffer.hot.max_ingest_data_rate")?,
        };
        let cold = TierConfig {
            total_capacity: config::require_u64(doc, "buffer.cold.total_capacity")?,
            rate_cap: config::require_u64(doc, "buffer.cold.max_data_rate")?,
        };
        Ok(Self { hot, cold })
    }
}
