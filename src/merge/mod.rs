//! Document reconciliation.
//!
//! Two strategies, selected by the pipeline action:
//! - Decrypt is a pass-through: parse the current document, ignore priors.
//! - Encrypt is a gap-fill union against exactly one prior document: the
//!   current value wins on every key present in both, and keys only the
//!   prior has are carried over unchanged.

pub mod union;

pub use union::*;
