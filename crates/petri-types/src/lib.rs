//! Shared type definitions for the Petri life observatory.
//!
//! This crate is the single source of truth for the types shared between
//! the grid engine, the run-log store, and the analysis layer. The structs
//! here mirror the on-disk run-log document exactly, so the JSON schema is
//! defined in one place.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for world (run) identifiers
//! - [`records`] -- Run-log document structs (`RunLog`, `StepRecord`, `GridSize`)

pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use ids::WorldId;
pub use records::{GridSize, RunLog, StepRecord};
