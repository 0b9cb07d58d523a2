use crate::error::{ConvertError, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Read and parse a JSON document
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    serde_json::from_slice(&content).map_err(|e| ConvertError::parse(path, e))
}

/// Replace `path` with `content` via a temp file in the same directory,
/// so a failed write leaves the previous file intact
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(path, e))?;
    temp_file
        .write_all(content)
        .map_err(|e| ConvertError::io(path, e))?;

    // Temp files are created owner-only; carry over the mode of the file being replaced
    if let Ok(existing) = std::fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| ConvertError::io(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| ConvertError::io(path, e.error))?;

    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
