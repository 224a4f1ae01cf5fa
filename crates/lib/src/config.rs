//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEBOUNCE_WINDOW_MS;

/// Tunables of a [`FormEngine`](crate::FormEngine).
///
/// Deserializes from a partial document; omitted fields keep their defaults.
///
/// ```
/// # use formstate::FormConfig;
/// let config: FormConfig = serde_json::from_str(r#"{"debounce_window_ms": 25}"#).unwrap();
/// assert_eq!(config.debounce_window_ms, 25);
/// assert!(config.validate_on_change);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How long the field register waits for quiet before flushing a batch.
    pub debounce_window_ms: u64,
    /// Recompute the error map after every model change. When false, errors
    /// are only recomputed by `validate()` and `submit()`.
    pub validate_on_change: bool,
}

impl FormConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            validate_on_change: true,
        }
    }
}
