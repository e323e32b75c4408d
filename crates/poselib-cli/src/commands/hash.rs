//! Print a library document's content hash.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::ExitCode;

use poselib_core::library_content_hash;

use crate::input::load_library;

/// Run the hash command
pub fn run(library_path: &str) -> Result<ExitCode> {
    let loaded = load_library(Path::new(library_path))
        .with_context(|| format!("Failed to load {}", library_path))?;

    let hash = library_content_hash(&loaded.library)
        .context("Failed to compute content hash")?;
    println!("{}", hash);

    Ok(ExitCode::SUCCESS)
}
