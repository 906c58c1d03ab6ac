//! confseal - merge-and-transform pipeline for JSON configuration documents.
//!
//! The tool runs the configured sensitive top-level fields of a config
//! document through an external transform command, producing either a fully
//! encrypted document (written to a file) or a fully decrypted one (printed
//! to stdout). Encrypting first reconciles the current document against its
//! prior version so keys the current document lost are preserved.
//!
//! ## Architecture
//!
//! One invocation is the three-stage sequence Merge -> Transform -> Sink,
//! selected by the action:
//! - `merge` - decrypt pass-through and encrypt gap-fill union
//! - `transform` - per-field replacement via the external transform command
//! - `sink` - compact JSON to stdout (decrypt) or a file (encrypt)
//! - `pipeline` - the action type and stage wiring
//! - `error` - the single terminal error per invocation
//! - `logging` - structured log context for every decision point
//! - `cli` - the flag surface of the `confseal` binary

pub mod cli;
pub mod error;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod sink;
pub mod transform;
