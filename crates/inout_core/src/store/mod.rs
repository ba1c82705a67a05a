//! Shared date store.
//!
//! # Responsibility
//! - Persist the single configured start date where both the configuration
//!   app and the widget can see it.
//! - Degrade every read-side fault to "not configured".
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod date_store;
