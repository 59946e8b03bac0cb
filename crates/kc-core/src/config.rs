//! Logging configuration.
//!
//! Embedded as the `[logging]` table of a subsystem definition.

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Whether the fmt layer emits ANSI colours.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

/// Default filter directive.
fn default_filter() -> String {
    "info".to_string()
}

const fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the given filter directive.
    #[must_use]
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Self::default()
        }
    }
}
