//! Run the parameter allocator and print the assignments.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use poselib_core::update_parameters;

use crate::input::load_library;

/// Run the allocate command
pub fn run(library_path: &str, json: bool) -> Result<ExitCode> {
    let loaded = load_library(Path::new(library_path))
        .with_context(|| format!("Failed to load {}", library_path))?;

    let mut library = loaded.library;
    let hash = update_parameters(&mut library).context("Failed to allocate parameters")?;

    if json {
        let mut poses = Vec::new();
        for category in &library.categories {
            for pose in &category.poses {
                let Some(assignment) = &pose.assignment else {
                    continue;
                };
                poses.push(serde_json::json!({
                    "category": category.name,
                    "pose": pose.name,
                    "parameter": assignment.parameter,
                    "value": assignment.value,
                    "index": assignment.index,
                }));
            }
        }
        let report = serde_json::json!({
            "library": library.name,
            "content_hash": hash,
            "parameters": library.parameters(),
            "poses": poses,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Allocated".cyan().bold(), library.name.bold());
    println!("  {}: {}", "Content hash".dimmed(), hash);
    println!(
        "  {}: {}",
        "Parameters".dimmed(),
        library.parameters().len()
    );

    for category in &library.categories {
        println!("  {}", category.name.bold());
        for pose in &category.poses {
            let Some(assignment) = &pose.assignment else {
                continue;
            };
            println!(
                "    {:<24} {} = {:<3} (index {})",
                pose.name, assignment.parameter, assignment.value, assignment.index
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
