//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file
///
/// Writes a sibling temp file, then renames it over the target. Creates the
/// parent directory if it doesn't exist.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", parent, e))?;
        }
    }

    let temp_path = temp_path_for(target_path);

    fs::write(&temp_path, content).map_err(|e| io_error("write_store_temp", &temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_store_temp", target_path, e));
    }

    Ok(())
}

/// Temp file next to `target_path`: `config.json` → `config.json.tmp`
fn temp_path_for(target_path: &Path) -> std::path::PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}
