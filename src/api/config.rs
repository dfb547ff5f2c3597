use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::data_registry::DEFAULT_MAX_DATA_POINTS;

/// Document assembly settings.
///
/// Serializable so hosts can keep their document layout next to the rest of
/// their configuration. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    #[serde(default = "default_parts_key")]
    pub parts_key: String,
    #[serde(default = "default_shared_data_key")]
    pub shared_data_key: String,
    /// Upper bound on values read from each provider. `None` reads until the
    /// provider is exhausted, which never happens for unbounded lazy sources.
    #[serde(default = "default_max_data_points")]
    pub max_data_points: Option<usize>,
    /// When `false`, hidden series, titles and legends are left out.
    /// Coordinate systems and axes are always written, with `show: false`.
    #[serde(default = "default_emit_hidden_parts")]
    pub emit_hidden_parts: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            parts_key: default_parts_key(),
            shared_data_key: default_shared_data_key(),
            max_data_points: default_max_data_points(),
            emit_hidden_parts: default_emit_hidden_parts(),
        }
    }
}

impl AssemblyConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parts_key(mut self, key: impl Into<String>) -> Self {
        self.parts_key = key.into();
        self
    }

    #[must_use]
    pub fn with_shared_data_key(mut self, key: impl Into<String>) -> Self {
        self.shared_data_key = key.into();
        self
    }

    #[must_use]
    pub fn with_max_data_points(mut self, max_data_points: usize) -> Self {
        self.max_data_points = Some(max_data_points);
        self
    }

    /// Reads every provider to exhaustion. Only safe when no provider is
    /// unbounded.
    #[must_use]
    pub fn without_data_point_limit(mut self) -> Self {
        self.max_data_points = None;
        self
    }

    #[must_use]
    pub fn with_emit_hidden_parts(mut self, emit_hidden_parts: bool) -> Self {
        self.emit_hidden_parts = emit_hidden_parts;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.parts_key.is_empty() || self.shared_data_key.is_empty() {
            return Err(ChartError::InvalidData(
                "document keys must not be empty".to_owned(),
            ));
        }
        if self.parts_key == self.shared_data_key {
            return Err(ChartError::InvalidData(format!(
                "parts and shared data cannot both use key `{}`",
                self.parts_key
            )));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse assembly config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize assembly config: {e}"))
        })
    }
}

fn default_parts_key() -> String {
    "parts".to_owned()
}

fn default_shared_data_key() -> String {
    "sharedData".to_owned()
}

fn default_max_data_points() -> Option<usize> {
    Some(DEFAULT_MAX_DATA_POINTS)
}

fn default_emit_hidden_parts() -> bool {
    true
}
