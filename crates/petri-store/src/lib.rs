//! Flat-file JSON run-log store.
//!
//! Each simulation run writes one JSON document to a flat directory, named
//! by the run's [`WorldId`]. The document is created once at run start and
//! then rewritten in full on every generation: read, append one step,
//! overwrite the end timestamp, write back.
//!
//! # Design
//!
//! - **Fail loudly at init**: a run that cannot create its log has no
//!   analyzable artifact, so [`RunStore::create_run`] propagates errors.
//! - **Fail softly at append**: [`RunStore::append_step`] returns a real
//!   [`StoreError`], but callers in the live loop are expected to log it
//!   and continue rather than interrupt the render cadence.
//! - **Whole-file rewrite**: O(generations²) over a run and not atomic.
//!   Accepted for an interactive tool; a crash mid-write can corrupt the
//!   file, which the loader then reports as an invalid document.
//!
//! [`WorldId`]: petri_types::WorldId

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::RunStore;
