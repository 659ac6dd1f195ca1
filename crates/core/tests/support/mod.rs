//! Shared test helpers for `hrcal-core` integration tests.
//!
//! Lightweight in-memory sources so scenario tests can focus on behaviour
//! instead of boilerplate.

pub mod calendar;
