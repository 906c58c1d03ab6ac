//! Structured logging with pipeline context.
//!
//! Provides logging utilities that include the action and current field
//! in every log message for easy correlation.

pub mod structured;

pub use structured::*;
