//! Observability infrastructure
//!
//! Structured logging via `tracing`. The subscriber is installed once by the
//! binary; library code only emits events.

pub mod logging;

pub use logging::{build_filter, init_tracing};
