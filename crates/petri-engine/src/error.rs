//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and simulation, so `main` can propagate
//! everything with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The run-log store failed fatally (run initialization only; append
    /// failures during the loop are downgraded to warnings).
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: petri_store::StoreError,
    },
}
