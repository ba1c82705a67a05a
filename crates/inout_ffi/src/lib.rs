//! Flutter-facing bridge over `inout_core`.

pub mod api;
