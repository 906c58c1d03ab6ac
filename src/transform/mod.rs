//! Sensitive-field transformation.
//!
//! Walks the configured sensitive fields of a merged document and replaces
//! each string value with the output of the external transform. The
//! transform itself is an injectable trait so the processing loop is
//! testable without spawning subprocesses.

pub mod command;
pub mod fields;

pub use command::*;
pub use fields::*;
