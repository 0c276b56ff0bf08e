//! Store file location
//!
//! A store lives at `<cwd>/<name>.<extension>`. Without an explicit `cwd`
//! the directory is `.superstore` under the process working directory.

use std::path::{Path, PathBuf};

use crate::options::StoreOptions;

/// Directory used when the options name none
pub const DEFAULT_STORE_DIR: &str = ".superstore";

/// Compute the store file path for the given options
///
/// For name "config" and extension "json", returns "<cwd>/config.json"
pub fn resolve_path(options: &StoreOptions) -> PathBuf {
    let dir = options
        .cwd
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));

    dir.join(file_name(&options.name, &extension(options)))
}

/// Extension in effect: explicit, else the format's default
pub fn extension(options: &StoreOptions) -> String {
    options
        .file_extension
        .as_deref()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .unwrap_or_else(|| options.format.default_extension().to_string())
}

fn file_name(name: &str, extension: &str) -> String {
    if extension.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, extension)
    }
}

/// Whether a file-name component would escape its directory
pub fn has_separator(component: &str) -> bool {
    component.contains('/') || component.contains('\\') || Path::new(component).is_absolute()
}
