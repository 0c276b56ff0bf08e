//! Store selection shared by all commands

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use superstore_store::{Format, StoreOptions, SuperStore};

pub mod read;
pub mod write;

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// TOML file with store options; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store name (file name without extension)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Directory holding the store file
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Use YAML instead of JSON
    #[arg(long, global = true)]
    pub yaml: bool,
}

impl StoreArgs {
    /// Options from the config file (if any) with flags applied on top
    pub fn options(&self) -> Result<StoreOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => StoreOptions::from_toml_file(path)?,
            None => StoreOptions::default(),
        };

        if let Some(name) = &self.name {
            options.name = name.clone();
        }
        if let Some(dir) = &self.dir {
            options.cwd = Some(dir.clone());
        }
        if self.yaml {
            options.format = Format::Yaml;
        }

        Ok(options)
    }

    pub fn open(&self) -> Result<SuperStore, Box<dyn std::error::Error>> {
        Ok(SuperStore::open(self.options()?)?)
    }
}

/// Parse a command-line value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render a value for stdout: strings bare, everything else as JSON
pub fn render_value(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other),
    }
}
