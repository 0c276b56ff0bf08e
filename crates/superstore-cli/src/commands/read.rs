//! Read commands: get, has, show, path
//!
//! `get --default` is the one read that can write: a missing key is stored
//! with the default before it is printed.

use clap::Args;
use superstore_core::errors::{ExError, ExErrorKind};

use super::{parse_value, render_value, StoreArgs};

#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Key, dot-separated for nested values
    pub key: String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Key, dot-separated for nested values
    pub key: String,

    /// Value to store and print if the key is missing
    #[arg(long)]
    pub default: Option<String>,
}

pub fn execute_get(store_args: &StoreArgs, args: GetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = store_args.open()?;

    let value = match args.default {
        Some(raw) => store.get(&args.key, parse_value(&raw))?,
        None => store.inner().get(&args.key)?.ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("get")
                .with_key(args.key.as_str())
                .with_message("Key not found")
        })?,
    };

    println!("{}", render_value(&value)?);
    Ok(())
}

/// Whether the key exists; `main` maps `false` to exit status 1
pub fn execute_has(store_args: &StoreArgs, args: KeyArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let store = store_args.open()?;
    Ok(store.has(&args.key)?)
}

pub fn execute_show(store_args: &StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = store_args.open()?;
    println!("{}", serde_json::to_string_pretty(&store.store()?)?);
    Ok(())
}

pub fn execute_path(store_args: &StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = store_args.open()?;
    println!("{}", store.path().display());
    Ok(())
}
