//! Constants used throughout the formstate library.
//!
//! This module provides central definitions for tunables and reserved strings.

use std::time::Duration;

/// Debounce window of the field register, in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u64 = 10;

/// Debounce window of the field register.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(DEBOUNCE_WINDOW_MS);

/// Separator between segments in canonical path strings.
pub const PATH_SEPARATOR: char = '.';

/// Key of a declarative rule set that holds per-item rules for an array.
pub const RULES_EACH_KEY: &str = "$each";

/// Key of a declarative rule set that holds whole-array rules.
pub const RULES_ARRAY_KEY: &str = "$array";

/// Longest container snapshot embedded in a `PathNotFound` error.
pub const SNAPSHOT_LIMIT: usize = 256;

/// Default tracing directive for binaries and the test harness.
pub const DEFAULT_LOG_DIRECTIVE: &str = "formstate=info";
