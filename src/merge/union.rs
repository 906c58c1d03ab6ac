//! Merge strategies for the two pipeline directions.

use serde_json::Value;

use crate::error::{Document, Error};
use crate::logging::structured::LogContext;
use crate::pipeline::Action;

/// Top-level structure of one JSON configuration document. Values are
/// opaque here; sensitive-field values are type-checked at transform time,
/// not at merge time.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Reconcile the input documents into a single map.
///
/// Decrypt parses `current` and ignores `priors` entirely. Encrypt requires
/// one prior document and backfills keys the current document lost.
pub fn merge(action: Action, current: &str, priors: &[String]) -> Result<ConfigMap, Error> {
    let ctx = LogContext::new(action);

    let merged = match action {
        Action::Decrypt => parse_document(current, Document::Current)?,
        Action::Encrypt => {
            let prior = priors.first().ok_or(Error::MissingSource)?;
            let mut cur_map = parse_document(current, Document::Current)?;
            let prior_map = parse_document(prior, Document::Prior)?;

            for (key, value) in prior_map {
                // Prior only fills gaps; current always wins on overlap.
                cur_map.entry(key).or_insert(value);
            }
            cur_map
        }
    };

    log::debug!("{} MERGE_COMPLETE keys={}", ctx, merged.len());
    Ok(merged)
}

/// Parse one document into a map, rejecting malformed and non-object JSON.
fn parse_document(raw: &str, doc: Document) -> Result<ConfigMap, Error> {
    serde_json::from_str(raw).map_err(|source| {
        log::warn!("PARSE_FAILED doc={} err={}", doc, source);
        Error::Parse { doc, source }
    })
}
