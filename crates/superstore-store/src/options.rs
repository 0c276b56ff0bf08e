//! Store options
//!
//! Built in code with the builder methods, or loaded from a TOML file:
//!
//! ```toml
//! name = "prefs"
//! cwd = "/home/me/.config/app"
//! format = "json"
//! clear_invalid_config = false
//!
//! [defaults]
//! theme = "dark"
//! window = { width = 800, height = 600 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{invalid_options, invalid_options_file, io_error, Result};
use crate::format::Format;
use crate::path::has_separator;

/// Options for opening a `FileStore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    /// Store file name without extension
    pub name: String,
    /// Directory holding the store file
    pub cwd: Option<PathBuf>,
    /// File extension; the format's default when unset, none when empty
    pub file_extension: Option<String>,
    pub format: Format,
    /// Values merged under the file's contents when the store opens
    pub defaults: Map<String, Value>,
    /// Treat an unparsable store file as empty instead of failing
    pub clear_invalid_config: bool,
    /// Interpret `a.b` keys as nested paths
    pub access_properties_by_dot_notation: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            name: "config".to_string(),
            cwd: None,
            file_extension: None,
            format: Format::Json,
            defaults: Map::new(),
            clear_invalid_config: true,
            access_properties_by_dot_notation: true,
        }
    }
}

impl StoreOptions {
    /// Default options with the given store name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = Some(extension.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add a single top-level default
    pub fn default_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    pub fn clear_invalid_config(mut self, clear: bool) -> Self {
        self.clear_invalid_config = clear;
        self
    }

    pub fn access_properties_by_dot_notation(mut self, enabled: bool) -> Self {
        self.access_properties_by_dot_notation = enabled;
        self
    }

    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML or has unknown
    /// fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| invalid_options_file(None, &e.to_string()))
    }

    /// Read and parse a TOML options file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `InvalidConfig` if it cannot
    /// be parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| io_error("read_options", path, e))?;
        toml::from_str(&text).map_err(|e| invalid_options_file(Some(path), &e.to_string()))
    }

    /// Check the options can name a file
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, or a name or extension that
    /// would leave the store directory.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid_options("Store name cannot be empty"));
        }
        if has_separator(&self.name) || self.name == "." || self.name == ".." {
            return Err(invalid_options(&format!(
                "Store name '{}' must be a plain file name",
                self.name
            )));
        }
        if let Some(ext) = &self.file_extension {
            if has_separator(ext) {
                return Err(invalid_options(&format!(
                    "File extension '{}' must not contain path separators",
                    ext
                )));
            }
        }
        Ok(())
    }
}
