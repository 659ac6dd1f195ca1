//! # HRCal App
//!
//! Application layer - commands and main entry point.
//!
//! This crate contains:
//! - Calendar commands (caller → backend bridge)
//! - Application context (dependency injection)
//! - The `hrcal` command-line entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
