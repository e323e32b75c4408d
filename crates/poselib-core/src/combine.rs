//! Combining sibling library documents.
//!
//! An avatar can carry several pose library components. Documents sharing
//! a name feed one merged menu; a document with an explicit target-menu
//! override is independently routed and must never be folded into a
//! shared menu.

use crate::alloc::update_parameters;
use crate::error::LibraryError;
use crate::library::PoseLibrary;

/// Merges a set of library documents and allocates every output.
///
/// Documents are partitioned by name in first-appearance order. Per name,
/// every contributor without a target-menu override is merged: category
/// lists concatenate in input order, and the first contributor's feature
/// toggles, thumbnail, and menu placement win. A merged document that
/// ends up with no categories is dropped.
///
/// Documents carrying a target-menu override are appended afterwards as
/// standalone outputs, in input order.
pub fn combine(libraries: &[PoseLibrary]) -> Result<Vec<PoseLibrary>, LibraryError> {
    let mut result = Vec::new();

    let mut names: Vec<&str> = Vec::new();
    for library in libraries {
        if !names.contains(&library.name.as_str()) {
            names.push(&library.name);
        }
    }

    for name in names {
        let mut merged: Option<PoseLibrary> = None;
        for library in libraries {
            if library.name != name || library.target_menu.is_some() {
                continue;
            }
            match merged.as_mut() {
                // First contributor: its toggles and thumbnail win.
                None => merged = Some(library.clone()),
                Some(m) => m.categories.extend(library.categories.iter().cloned()),
            }
        }

        if let Some(mut library) = merged {
            if !library.categories.is_empty() {
                update_parameters(&mut library)?;
                result.push(library);
            }
        }
    }

    for library in libraries {
        if library.target_menu.is_none() {
            continue;
        }
        let mut standalone = library.clone();
        update_parameters(&mut standalone)?;
        result.push(standalone);
    }

    Ok(result)
}
