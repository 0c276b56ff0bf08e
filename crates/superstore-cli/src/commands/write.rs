//! Write commands: set, delete, clear, reset

use clap::Args;

use super::{parse_value, StoreArgs};
use crate::commands::read::KeyArgs;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Key, dot-separated for nested values
    pub key: String,

    /// Value, parsed as JSON; anything that isn't JSON is stored as a string
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Keys to reset to their defaults
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub fn execute_set(store_args: &StoreArgs, args: SetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = store_args.open()?;
    store.set(&args.key, parse_value(&args.value))?;
    Ok(())
}

pub fn execute_delete(
    store_args: &StoreArgs,
    args: KeyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = store_args.open()?;
    if !store.delete(&args.key)? {
        eprintln!("Key '{}' was not set", args.key);
    }
    Ok(())
}

pub fn execute_clear(store_args: &StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = store_args.open()?;
    store.clear()?;
    Ok(())
}

pub fn execute_reset(
    store_args: &StoreArgs,
    args: ResetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = store_args.open()?;
    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
    store.reset(&keys)?;
    Ok(())
}
