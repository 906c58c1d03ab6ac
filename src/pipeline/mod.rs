//! Pipeline orchestration module.
//!
//! One invocation runs the three-stage sequence Merge -> Transform -> Sink
//! for a single action. Any stage failure short-circuits the rest, so at
//! most one error surfaces per invocation.

pub mod run;

pub use run::*;
