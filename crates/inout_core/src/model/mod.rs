//! Domain model for the IN/OUT cycle.
//!
//! # Responsibility
//! - Define the canonical cycle types shared by every front end.
//! - Keep derived values (phase, timeline) separate from persisted values.
//!
//! # Invariants
//! - `CycleStartDate` is the only persisted value.
//! - `CyclePhase` is always derived, never stored.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod phase;
pub mod start_date;
pub mod timeline;
