//! Combine sibling library documents and print or write the outputs.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use poselib_core::{combine, PoseLibrary};

use crate::input::load_library;

/// Run the combine command
pub fn run(library_paths: &[String], json: bool, output_dir: Option<&str>) -> Result<ExitCode> {
    let mut libraries = Vec::new();
    for path in library_paths {
        let loaded =
            load_library(Path::new(path)).with_context(|| format!("Failed to load {}", path))?;
        libraries.push(loaded.library);
    }

    let outputs = combine(&libraries).context("Failed to combine documents")?;

    if let Some(dir) = output_dir {
        let dir = Path::new(dir);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        for library in &outputs {
            let path = dir.join(output_file_name(library));
            let contents = library
                .to_json_pretty()
                .context("Failed to serialize combined document")?;
            std::fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    if json {
        let report: Vec<serde_json::Value> = outputs
            .iter()
            .map(|library| {
                serde_json::json!({
                    "name": library.name,
                    "content_hash": library.guid,
                    "categories": library.categories.len(),
                    "poses": library.pose_count(),
                    "parameters": library.parameters(),
                    "target_menu": library.target_menu,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} input{} into {} document{}",
        "Combined".cyan().bold(),
        libraries.len(),
        if libraries.len() == 1 { "" } else { "s" },
        outputs.len(),
        if outputs.len() == 1 { "" } else { "s" }
    );

    for library in &outputs {
        let routing = match &library.target_menu {
            Some(menu) => format!("-> {}", menu),
            None => "merged".to_string(),
        };
        println!(
            "  {:<20} {} poses, {} parameter{} ({}) [{}]",
            library.name.bold(),
            library.pose_count(),
            library.parameters().len(),
            if library.parameters().len() == 1 { "" } else { "s" },
            library.guid.as_deref().unwrap_or("-"),
            routing.dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Output file name for a combined document; overridden documents get a
/// hash suffix so same-named outputs cannot collide.
fn output_file_name(library: &PoseLibrary) -> String {
    let base: String = library
        .name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    match (&library.target_menu, &library.guid) {
        (Some(_), Some(guid)) => format!("{}-{}.json", base, guid),
        _ => format!("{}.json", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poselib_core::{update_parameters, PoseCategory, PoseEntry};

    #[test]
    fn test_output_file_name_sanitizes() {
        let library = PoseLibrary::builder("My Poses!").build();
        assert_eq!(output_file_name(&library), "My_Poses_.json");
    }

    #[test]
    fn test_output_file_name_suffixes_overrides() {
        let mut library = PoseLibrary::builder("A")
            .category(PoseCategory::with_poses(
                "c",
                vec![PoseEntry::with_clip("p", "p.anim")],
            ))
            .target_menu("Menus/x.asset")
            .build();
        let hash = update_parameters(&mut library).unwrap();
        assert_eq!(output_file_name(&library), format!("A-{}.json", hash));
    }
}
