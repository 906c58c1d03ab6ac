//! Compact-JSON writers for the two pipeline directions.

use std::io::Write;

use crate::error::Error;
use crate::merge::ConfigMap;

/// Serialize `map` and print it to stdout. No trailing newline: the
/// document itself is the entire output.
pub fn write_stdout(map: &ConfigMap) -> Result<(), Error> {
    let body = serde_json::to_string(map).map_err(Error::Serialize)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Serialize `map` and write it to `path`, creating the file or fully
/// truncating any previous content.
pub fn write_file(path: &str, map: &ConfigMap) -> Result<(), Error> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let body = serde_json::to_string(map).map_err(Error::Serialize)?;
    std::fs::write(path, &body)?;

    log::debug!("SINK_WRITTEN path={} bytes={}", path, body.len());
    Ok(())
}
