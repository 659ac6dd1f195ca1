//! External service integrations

pub mod hr_api;
