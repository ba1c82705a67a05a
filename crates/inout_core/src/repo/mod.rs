//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the settings access contract used by the shared date store.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidKey`, `InvalidValue`)
//!   in addition to DB transport errors.

pub mod settings_repo;
