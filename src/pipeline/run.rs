//! Pipeline entry point.
//!
//! Wires the stages together: the merger reconciles the input documents,
//! the field transformer rewrites sensitive values, and the sink emits the
//! result to stdout (decrypt) or a file (encrypt).

use clap::ValueEnum;

use crate::error::Error;
use crate::logging::structured::LogContext;
use crate::merge::merge;
use crate::sink;
use crate::transform::{process_fields, Transform};

/// Which direction the pipeline runs in. Selects the merge strategy, the
/// tag passed to the external transform, and the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Encrypt => "encrypt",
            Action::Decrypt => "decrypt",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run one full pipeline invocation.
///
/// `current` is the document being transformed; `priors` holds the previous
/// version of the document (encrypt requires exactly one, decrypt ignores
/// them). `out_path` is only consulted in encrypt mode.
pub fn run(
    action: Action,
    current: &str,
    priors: &[String],
    sensitive_fields: &str,
    out_path: &str,
    transform: &dyn Transform,
) -> Result<(), Error> {
    let ctx = LogContext::new(action);

    let merged = merge(action, current, priors)?;

    // Encrypt needs the output path before any transform is spawned; a
    // merge failure still takes precedence.
    if action == Action::Encrypt && out_path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let processed = process_fields(merged, sensitive_fields, action, transform)?;

    match action {
        Action::Decrypt => sink::write_stdout(&processed)?,
        Action::Encrypt => sink::write_file(out_path, &processed)?,
    }

    log::info!("{} PIPELINE_COMPLETE keys={}", ctx, processed.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformFailure;

    /// Reverses values, tagged so encrypt/decrypt are distinguishable.
    struct Reverser;

    impl Transform for Reverser {
        fn transform(&self, value: &str, _action: Action) -> Result<String, TransformFailure> {
            Ok(value.chars().rev().collect())
        }
    }

    #[test]
    fn test_encrypt_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sealed.json");
        let out_str = out.to_str().unwrap();

        run(
            Action::Encrypt,
            r#"{"token":"abc"}"#,
            &[r#"{"region":"eu"}"#.to_string()],
            "token",
            out_str,
            &Reverser,
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&written).unwrap();
        assert_eq!(map["token"], "cba");
        assert_eq!(map["region"], "eu");
    }

    #[test]
    fn test_encrypt_without_prior_fails() {
        let err = run(
            Action::Encrypt,
            r#"{"a":"aa"}"#,
            &[],
            "",
            "out.json",
            &Reverser,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingSource));
    }

    #[test]
    fn test_encrypt_empty_out_path_checked_before_transforms() {
        use std::cell::RefCell;

        struct Counting(RefCell<usize>);

        impl Transform for Counting {
            fn transform(&self, value: &str, _action: Action) -> Result<String, TransformFailure> {
                *self.0.borrow_mut() += 1;
                Ok(value.to_string())
            }
        }

        let counting = Counting(RefCell::new(0));
        let err = run(
            Action::Encrypt,
            r#"{"a":"aa"}"#,
            &[r#"{"a":"a"}"#.to_string()],
            "a",
            "",
            &counting,
        )
        .unwrap_err();

        assert!(matches!(err, Error::EmptyPath));
        assert_eq!(*counting.0.borrow(), 0);
    }

    #[test]
    fn test_merge_failure_reaches_caller_before_sink() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sealed.json");

        let err = run(
            Action::Encrypt,
            r#"{"a""aa"}"#,
            &[r#"{"a":"a"}"#.to_string()],
            "a",
            out.to_str().unwrap(),
            &Reverser,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(!out.exists());
    }
}
