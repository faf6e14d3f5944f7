//! Loader limits.

use serde::{Deserialize, Serialize};

/// Maximum accepted input size (200 MB default).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Row count above which a load logs a warning.
pub const DEFAULT_ROW_WARNING_THRESHOLD: usize = 1_000_000;

/// Limits applied to every loaded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Inputs larger than this are rejected before parsing.
    pub max_file_size: u64,

    /// Tables with more rows than this still load, with a warning.
    pub row_warning_threshold: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            row_warning_threshold: DEFAULT_ROW_WARNING_THRESHOLD,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_row_warning_threshold(mut self, rows: usize) -> Self {
        self.row_warning_threshold = rows;
        self
    }
}
