//! Pipeline error model.
//!
//! Every error is terminal for the current invocation: the pipeline
//! short-circuits on the first failure and nothing is retried. The stages
//! return `Result` directly, so a merge failure is consumed before the
//! field transformer does any work.

use thiserror::Error;

use crate::pipeline::Action;

/// Which input document failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Current,
    Prior,
}

impl Document {
    pub fn as_str(&self) -> &'static str {
        match self {
            Document::Current => "current",
            Document::Prior => "prior",
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the merge/transform/sink pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// An input document was malformed JSON or not a top-level object.
    #[error("failed to parse {doc} document: {source}")]
    Parse {
        doc: Document,
        #[source]
        source: serde_json::Error,
    },

    /// Encrypt merge was invoked without a prior document to reconcile.
    #[error("merge missing prior document")]
    MissingSource,

    /// A sensitive field held a non-string value.
    #[error("action: {action} field: {field} value is not a string")]
    FieldType { action: Action, field: String },

    /// The external transform failed, timed out, or signaled failure in-band.
    #[error("transform failed, action: {action} field: {field}: {detail}")]
    Transform {
        action: Action,
        field: String,
        detail: String,
    },

    /// Encrypt sink was given an empty output path.
    #[error("missing output file path")]
    EmptyPath,

    /// The final document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Sink I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
