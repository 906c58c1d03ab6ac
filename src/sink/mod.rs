//! Output sinks.
//!
//! Decrypt prints the document to stdout; encrypt writes it to a file.
//! Both emit compact JSON with no trailing message, so the document is the
//! only output of a successful run.

pub mod writer;

pub use writer::*;
