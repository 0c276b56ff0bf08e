//! SuperStore CLI
//!
//! Inspect and edit a file-backed configuration store from the shell

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use superstore_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "superstore")]
#[command(about = "SuperStore - self-healing configuration files", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: commands::StoreArgs,

    /// Human-readable logs on stderr
    #[arg(long, short, global = true, conflicts_with = "json_logs")]
    verbose: bool,

    /// JSON logs on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a value; with --default, store the default if the key is missing
    Get(commands::read::GetArgs),
    /// Exit 0 if the key exists, 1 otherwise
    Has(commands::read::KeyArgs),
    /// Print the whole store
    Show,
    /// Print the store file path
    Path,
    /// Store a value (parsed as JSON, else taken as a string)
    Set(commands::write::SetArgs),
    /// Remove a key
    Delete(commands::read::KeyArgs),
    /// Reset the whole store to its defaults
    Clear,
    /// Reset keys to their defaults
    Reset(commands::write::ResetArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_logs {
        init(Profile::Production);
    } else if cli.verbose {
        init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Get(args) => commands::read::execute_get(&cli.store, args).map(|()| true),
        Commands::Has(args) => commands::read::execute_has(&cli.store, args),
        Commands::Show => commands::read::execute_show(&cli.store).map(|()| true),
        Commands::Path => commands::read::execute_path(&cli.store).map(|()| true),
        Commands::Set(args) => commands::write::execute_set(&cli.store, args).map(|()| true),
        Commands::Delete(args) => commands::write::execute_delete(&cli.store, args).map(|()| true),
        Commands::Clear => commands::write::execute_clear(&cli.store).map(|()| true),
        Commands::Reset(args) => commands::write::execute_reset(&cli.store, args).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
