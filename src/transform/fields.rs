//! Per-field transformation loop.

use serde_json::Value;

use crate::error::Error;
use crate::logging::structured::LogContext;
use crate::merge::ConfigMap;
use crate::pipeline::Action;

/// Separator between field names in the sensitive-field configuration.
pub const FIELD_SEPARATOR: char = ',';

/// Transform output carrying this substring is a failure even when the
/// call itself succeeded. In-band signal inherited from the external
/// transform's output contract; the substring must match byte-for-byte.
pub const FAILURE_MARKER: &str = "error Exception";

/// One external transform application. Implementations must bound their
/// own blocking time; the pipeline never retries a failed call.
pub trait Transform {
    fn transform(&self, value: &str, action: Action) -> Result<String, TransformFailure>;
}

/// Failure reported by a transform implementation. Field attribution is
/// added by the processing loop, which knows which field was in flight.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct TransformFailure {
    pub reason: String,
}

impl TransformFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Replace every configured sensitive field of `map` with its transformed
/// value, in configuration order.
///
/// Fields absent from the map are skipped silently. A present field whose
/// value is not a string aborts the loop, as does any transform failure;
/// the partially mutated map is dropped with the error.
pub fn process_fields(
    mut map: ConfigMap,
    sensitive_fields: &str,
    action: Action,
    transform: &dyn Transform,
) -> Result<ConfigMap, Error> {
    let fields = sensitive_fields.trim();
    if fields.is_empty() {
        log::debug!("{} FIELDS_EMPTY passthrough", LogContext::new(action));
        return Ok(map);
    }

    for field in fields.split(FIELD_SEPARATOR) {
        let ctx = LogContext::new(action).with_field(field);

        let Some(value) = map.get(field) else {
            log::debug!("{} FIELD_SKIPPED reason=absent", ctx);
            continue;
        };

        let Some(text) = value.as_str() else {
            log::warn!("{} FIELD_REJECTED reason=not_a_string", ctx);
            return Err(Error::FieldType {
                action,
                field: field.to_string(),
            });
        };

        let output = transform
            .transform(text, action)
            .map_err(|failure| Error::Transform {
                action,
                field: field.to_string(),
                detail: failure.to_string(),
            })?;

        if output.contains(FAILURE_MARKER) {
            log::warn!("{} TRANSFORM_REJECTED reason=in_band_failure", ctx);
            return Err(Error::Transform {
                action,
                field: field.to_string(),
                detail: format!("transform reported failure: {output}"),
            });
        }

        log::debug!("{} FIELD_TRANSFORMED", ctx);
        map.insert(field.to_string(), Value::String(output));
    }

    Ok(map)
}
