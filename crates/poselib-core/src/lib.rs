//! Pose Library Core
//!
//! This crate provides the document model, validation, parameter
//! allocation, and content hashing for avatar pose libraries. A library
//! is a JSON document describing a hierarchical menu of held poses:
//!
//! - **Library**: name (the merge key), thumbnail, feature toggles, and
//!   an ordered list of categories
//! - **Category**: a named, ordered group of poses
//! - **Pose**: clips, thumbnail, optional audio, and tracking flags
//!
//! # Example
//!
//! ```
//! use poselib_core::{PoseCategory, PoseEntry, PoseLibrary};
//! use poselib_core::alloc::update_parameters;
//! use poselib_core::validation::validate_library;
//!
//! // Build a document
//! let mut library = PoseLibrary::builder("Photo Poses")
//!     .thumbnail("Textures/photo.png")
//!     .category(PoseCategory::with_poses(
//!         "Sitting",
//!         vec![PoseEntry::with_clip("Chair", "Animations/chair.anim")],
//!     ))
//!     .build();
//!
//! // Validate it
//! let result = validate_library(&library);
//! assert!(result.is_ok());
//!
//! // Allocate parameters and compute the content hash
//! let hash = update_parameters(&mut library).unwrap();
//! println!("content hash: {}", hash);
//! ```
//!
//! # Modules
//!
//! - [`alloc`]: Deterministic parameter allocation
//! - [`clipboard`]: JSON interchange for single poses and categories
//! - [`combine`]: Merging sibling documents by name
//! - [`edit`]: Snapshot-based editing with undo/redo
//! - [`error`]: Error and warning types
//! - [`hash`]: Canonical hashing
//! - [`library`]: Document types and builder
//! - [`validation`]: Document validation

pub mod alloc;
pub mod clipboard;
pub mod combine;
pub mod edit;
pub mod error;
pub mod hash;
pub mod library;
pub mod validation;

// Re-export commonly used types at the crate root
pub use alloc::{update_parameters, ParamAssignment, MAX_ANIMATION_STATE};
pub use clipboard::{classify, copy_category, copy_pose, paste_category, paste_pose, ClipboardKind};
pub use combine::combine;
pub use edit::{EditCommand, EditOutcome, EditSession, HistoryEntry};
pub use error::{
    ErrorCode, LibraryError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{canonical_value_hash, canonicalize_json, library_content_hash, CONTENT_HASH_LEN};
pub use library::{
    LibraryBuilder, PoseCategory, PoseEntry, PoseLibrary, TrackingSetting, WriteDefaultPolicy,
};
pub use validation::validate_library;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn library(name: &str, categories: &[(&str, usize)]) -> PoseLibrary {
        let mut builder = PoseLibrary::builder(name).thumbnail("Textures/lib.png");
        for (cat_name, pose_count) in categories {
            let poses = (0..*pose_count)
                .map(|i| {
                    PoseEntry::with_clip(
                        format!("{}-{}", cat_name, i),
                        format!("Animations/{}-{}.anim", cat_name, i),
                    )
                })
                .collect();
            builder = builder.category(PoseCategory::with_poses(*cat_name, poses));
        }
        builder.build()
    }

    /// Documents with a shared name merge, allocate, and hash stably.
    #[test]
    fn test_combine_and_allocate_end_to_end() {
        let d1 = library("A", &[("sitting", 2)]);
        let d2 = library("A", &[("standing", 3)]);
        let d3 = {
            let mut d = library("A", &[("floor", 1)]);
            d.target_menu = Some("Menus/extra.asset".into());
            d
        };

        let outputs = combine(&[d1.clone(), d2.clone(), d3.clone()]).unwrap();
        assert_eq!(outputs.len(), 2);

        let merged = &outputs[0];
        assert_eq!(merged.name, "A");
        assert_eq!(merged.pose_count(), 5);
        assert_eq!(merged.parameters().len(), 1);

        let indices: Vec<u32> = merged
            .poses()
            .map(|p| p.assignment.as_ref().unwrap().index)
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);

        let standalone = &outputs[1];
        assert_eq!(standalone.pose_count(), 1);
        assert_ne!(merged.guid, standalone.guid);

        // Combining the same inputs again reproduces the same hashes.
        let again = combine(&[d1, d2, d3]).unwrap();
        assert_eq!(again[0].guid, merged.guid);
        assert_eq!(again[1].guid, standalone.guid);
    }

    /// Edited snapshots allocate consistently; undo restores the prior
    /// hash exactly.
    #[test]
    fn test_edit_session_then_allocate() {
        let mut session = EditSession::new(library("Edit", &[("base", 2)]));
        let mut before = session.library().clone();
        let hash_before = update_parameters(&mut before).unwrap();

        session.apply(EditCommand::AddPose {
            category: 0,
            index: 2,
            pose: PoseEntry::with_clip("extra", "Animations/extra.anim"),
        });
        let mut after = session.library().clone();
        let hash_after = update_parameters(&mut after).unwrap();
        assert_ne!(hash_before, hash_after);
        assert_eq!(after.pose_count(), 3);

        session.undo();
        let mut reverted = session.library().clone();
        assert_eq!(update_parameters(&mut reverted).unwrap(), hash_before);
    }

    /// Clipboard payloads survive a copy/classify/paste cycle and slot
    /// back into a document.
    #[test]
    fn test_clipboard_into_edit_session() {
        let source = library("Source", &[("sitting", 1)]);
        let payload = copy_category(&source.categories[0]).unwrap();
        assert_eq!(classify(&payload), ClipboardKind::Category);

        let mut session = EditSession::new(library("Dest", &[]));
        let category = paste_category(&payload).unwrap();
        session.apply(EditCommand::AddCategory { index: 0, category });

        assert_eq!(session.library().pose_count(), 1);
        assert!(validate_library(session.library()).is_ok());
    }

    /// The content hash ignores allocator output but tracks authored
    /// content.
    #[test]
    fn test_hash_contract() {
        let mut a = library("H", &[("c", 2)]);
        let b = a.clone();

        update_parameters(&mut a).unwrap();
        assert_eq!(
            library_content_hash(&a).unwrap(),
            library_content_hash(&b).unwrap()
        );

        let mut renamed = b.clone();
        renamed.name = "H2".into();
        assert_ne!(
            library_content_hash(&b).unwrap(),
            library_content_hash(&renamed).unwrap()
        );
    }
}
