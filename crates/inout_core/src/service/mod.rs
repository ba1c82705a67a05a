//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and calculator calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod cycle_service;
