//! Pure cycle arithmetic.
//!
//! # Responsibility
//! - Map a start date and a reference date to a `CyclePhase`.
//! - Stay free of I/O and shared state so any caller can use it directly.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod phase_calc;
pub mod timeline;
