//! Subprocess-backed transform.
//!
//! Invokes the configured external program once per field value, with a
//! hard timeout enforced by process kill. The child is polled with
//! `try_wait` so a hung transform cannot stall the pipeline past the
//! deadline.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::pipeline::Action;
use crate::transform::fields::{Transform, TransformFailure};

/// Hard per-call deadline for the external transform.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default transform program. Stands in for a real sealer: it echoes the
/// value back with the action tag appended, which keeps the wire shape
/// visible end to end.
pub const DEFAULT_PROGRAM: &str = "echo";

/// Transform that shells out to an external program, passing
/// `<value>-<action>` as its single argument and reading stdout back.
#[derive(Debug, Clone)]
pub struct CommandTransform {
    program: String,
    timeout: Duration,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the deadline. The pipeline always runs with
    /// [`DEFAULT_TIMEOUT`]; shorter deadlines exist for tests.
    pub fn with_timeout(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Transform for CommandTransform {
    fn transform(&self, value: &str, action: Action) -> Result<String, TransformFailure> {
        let arg = format!("{value}-{action}");

        let mut child = Command::new(&self.program)
            .arg(&arg)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TransformFailure::new(format!("spawning {}: {e}", self.program)))?;

        // Drain stdout on its own thread so a child producing more than
        // the pipe buffer can keep writing and exit.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| TransformFailure::new("transform stdout not captured"))?;
        let reader = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let status = match wait_with_timeout(&mut child, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                // Deadline passed; kill and reap so no zombie is left.
                // Killing closes the pipe, which ends the reader thread.
                let _ = child.kill();
                let _ = child.wait();
                let _ = reader.join();
                log::warn!(
                    "TRANSFORM_TIMEOUT program={} timeout={:?}",
                    self.program,
                    self.timeout
                );
                return Err(TransformFailure::new(format!(
                    "timed out after {:?}",
                    self.timeout
                )));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = reader.join();
                return Err(TransformFailure::new(format!("waiting for transform: {e}")));
            }
        };

        let raw = reader
            .join()
            .map_err(|_| TransformFailure::new("transform output reader panicked"))?
            .map_err(|e| TransformFailure::new(format!("reading transform output: {e}")))?;

        if !status.success() {
            return Err(TransformFailure::new(format!(
                "exited with {status}: {}",
                String::from_utf8_lossy(&raw)
            )));
        }

        let output = String::from_utf8(raw)
            .map_err(|e| TransformFailure::new(format!("transform output not utf-8: {e}")))?;

        Ok(output.trim_end_matches('\n').to_string())
    }
}

/// Poll `try_wait` until the child exits or the deadline passes.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None => {
                if start.elapsed() >= timeout {
                    return Ok(None);
                }
                std::thread::sleep(poll_interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_transform_appends_action_tag() {
        let transform = CommandTransform::new("echo");
        let out = transform.transform("secret", Action::Encrypt).unwrap();
        assert_eq!(out, "secret-encrypt");
    }

    #[test]
    fn test_trailing_newline_stripped() {
        // echo terminates its output with a newline; the transform must
        // hand back the bare value.
        let transform = CommandTransform::new("echo");
        let out = transform.transform("v", Action::Decrypt).unwrap();
        assert!(!out.ends_with('\n'));
        assert_eq!(out, "v-decrypt");
    }

    #[test]
    fn test_large_output_drained_while_waiting() {
        // Output well beyond the pipe buffer must not stall the child
        // into the deadline.
        let transform = CommandTransform::with_timeout("echo", Duration::from_secs(2));
        let value = "x".repeat(100_000);

        let start = Instant::now();
        let out = transform.transform(&value, Action::Encrypt).unwrap();
        assert!(start.elapsed() < Duration::from_secs(2));
        assert_eq!(out.len(), value.len() + "-encrypt".len());
    }

    #[test]
    fn test_non_utf8_output_rejected() {
        // printf expands \xff to a raw 0xFF byte, which is not valid
        // UTF-8.
        let transform = CommandTransform::new("printf");
        let err = transform.transform("\\xff", Action::Encrypt).unwrap_err();
        assert!(err.reason.contains("not utf-8"));
    }

    #[test]
    fn test_missing_program_fails() {
        let transform = CommandTransform::new("confseal-no-such-program");
        let err = transform.transform("v", Action::Encrypt).unwrap_err();
        assert!(err.reason.contains("spawning"));
    }

    #[test]
    fn test_hung_program_killed_at_deadline() {
        let transform = CommandTransform::with_timeout("sleep", Duration::from_millis(200));
        // sleep treats "10-encrypt" as an invalid duration on some
        // platforms and as 10 seconds on others; either way the call must
        // come back within the deadline rather than block.
        let start = Instant::now();
        let result = transform.transform("10", Action::Encrypt);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_failing_program_reports_exit_status() {
        let transform = CommandTransform::new("false");
        let err = transform.transform("v", Action::Decrypt).unwrap_err();
        assert!(err.reason.contains("exited with"));
    }
}
