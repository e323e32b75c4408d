//! Validate a library document without building anything.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use poselib_core::validate_library;

use crate::input::load_library;

/// Run the validate command
pub fn run(library_path: &str, json: bool) -> Result<ExitCode> {
    let loaded = load_library(Path::new(library_path))
        .with_context(|| format!("Failed to load {}", library_path))?;

    let result = validate_library(&loaded.library);

    if json {
        let report = serde_json::json!({
            "library": loaded.library.name,
            "source_hash": loaded.source_hash,
            "ok": result.is_ok(),
            "errors": result.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            "warnings": result.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    println!(
        "{} {}",
        "Validating".cyan().bold(),
        loaded.library.name.bold()
    );

    for warning in &result.warnings {
        println!("  {} {}", "WARN".yellow().bold(), warning);
    }
    for error in &result.errors {
        println!("  {} {}", "ERROR".red().bold(), error);
    }

    if result.is_ok() {
        println!("  {} document is valid", "OK".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "  {} {} error{}",
            "FAILED".red().bold(),
            result.errors.len(),
            if result.errors.len() == 1 { "" } else { "s" }
        );
        Ok(ExitCode::FAILURE)
    }
}
