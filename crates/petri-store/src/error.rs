//! Error types for the `petri-store` crate.
//!
//! All fallible operations in this crate return [`StoreError`] through the
//! standard [`Result`] type alias.

use petri_types::WorldId;

/// Errors that can occur during run-log storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No log file exists for the requested run.
    #[error("no log found for world {0}")]
    NotFound(WorldId),

    /// The log file exists but does not hold a parseable document.
    #[error("log for world {world_id} is not valid JSON: {source}")]
    Invalid {
        /// The run whose log is unreadable.
        world_id: WorldId,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// Reading or writing the log file failed.
    #[error("log I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing a log document failed.
    #[error("log serialization failed: {source}")]
    Serialize {
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}
