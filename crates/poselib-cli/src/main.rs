//! Pose library CLI - authoring and inspection tools for pose library
//! documents
//!
//! This binary provides commands for validating, allocating, combining,
//! and inspecting pose library documents, and for managing the local
//! build cache.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use poselib_cli::commands;

/// Pose library authoring and inspection tools
#[derive(Parser)]
#[command(name = "poselib")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a library document without building anything
    Validate {
        /// Path to the library document (JSON)
        #[arg(short, long)]
        library: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a library document's content hash
    Hash {
        /// Path to the library document (JSON)
        #[arg(short, long)]
        library: String,
    },

    /// Run the parameter allocator and print the assignments
    Allocate {
        /// Path to the library document (JSON)
        #[arg(short, long)]
        library: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Combine sibling library documents into allocated outputs
    Combine {
        /// Paths to the library documents (JSON)
        #[arg(required = true)]
        libraries: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Write each combined document to this directory
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a summary of a library document
    Show {
        /// Path to the library document (JSON)
        #[arg(short, long)]
        library: String,
    },

    /// Manage the local build cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache directory, entry count, and total size
    Info,

    /// Remove all cache entries
    Clear,

    /// Remove the cache entries for one document's content hash
    Rm {
        /// The document's content hash
        hash: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { library, json } => commands::validate::run(&library, json),
        Commands::Hash { library } => commands::hash::run(&library),
        Commands::Allocate { library, json } => commands::allocate::run(&library, json),
        Commands::Combine {
            libraries,
            json,
            output,
        } => commands::combine::run(&libraries, json, output.as_deref()),
        Commands::Show { library } => commands::show::run(&library),
        Commands::Cache { command } => match command {
            CacheCommands::Info => commands::cache::info(),
            CacheCommands::Clear => commands::cache::clear(),
            CacheCommands::Rm { hash } => commands::cache::rm(&hash),
        },
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
