//! Print a summary of a library document.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use poselib_core::update_parameters;

use crate::input::load_library;

fn toggle(label: &str, enabled: bool) -> String {
    if enabled {
        format!("{} {}", "on ".green(), label)
    } else {
        format!("{} {}", "off".dimmed(), label)
    }
}

/// Run the show command
pub fn run(library_path: &str) -> Result<ExitCode> {
    let loaded = load_library(Path::new(library_path))
        .with_context(|| format!("Failed to load {}", library_path))?;

    let mut library = loaded.library;
    let hash = update_parameters(&mut library).context("Failed to allocate parameters")?;

    println!("{}", library.name.cyan().bold());
    println!("  {}: {}", "Content hash".dimmed(), hash);
    println!("  {}: {}", "Source hash".dimmed(), loaded.source_hash);
    println!("  {}: {}", "Categories".dimmed(), library.categories.len());
    println!("  {}: {}", "Poses".dimmed(), library.pose_count());
    println!(
        "  {}: {}",
        "Parameters".dimmed(),
        library.parameters().join(", ")
    );
    println!(
        "  {}: {}",
        "Audio mode".dimmed(),
        if library.audio_mode() { "yes" } else { "no" }
    );
    println!(
        "  {}: {}",
        "Write defaults".dimmed(),
        library.write_default
    );
    if let Some(menu) = &library.target_menu {
        println!("  {}: {}", "Target menu".dimmed(), menu);
    }
    if let Some(menu) = &library.settings_menu {
        println!("  {}: {}", "Settings menu".dimmed(), menu);
    }

    println!("  {}:", "Toggles".dimmed());
    println!("    {}", toggle("height param", library.enable_height_param));
    println!("    {}", toggle("speed param", library.enable_speed_param));
    println!("    {}", toggle("mirror param", library.enable_mirror_param));
    println!(
        "    {}",
        toggle("tracking menu", library.enable_tracking_param)
    );
    println!("    {}", toggle("deep sync", library.enable_deep_sync));
    println!("    {}", toggle("pose space", library.enable_pose_space));
    println!("    {}", toggle("build cache", library.enable_use_cache));
    println!(
        "    {}",
        toggle("locomotion animator", library.enable_locomotion_animator)
    );
    println!("    {}", toggle("fx animator", library.enable_fx_animator));

    Ok(ExitCode::SUCCESS)
}
