//! Clipboard interchange for single poses and categories.
//!
//! Records travel through the system clipboard as JSON. A payload is
//! classified before pasting so callers can gate their paste actions;
//! malformed content is a non-fatal decode error that leaves the
//! document untouched.

use crate::error::LibraryError;
use crate::library::{PoseCategory, PoseEntry};

/// What a clipboard payload contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardKind {
    /// A single pose record.
    Pose,
    /// A category record (carries a `poses` array).
    Category,
    /// Not a recognizable record.
    Unknown,
}

/// Serializes a pose for the clipboard.
pub fn copy_pose(pose: &PoseEntry) -> Result<String, LibraryError> {
    Ok(serde_json::to_string(pose)?)
}

/// Serializes a category for the clipboard.
pub fn copy_category(category: &PoseCategory) -> Result<String, LibraryError> {
    Ok(serde_json::to_string(category)?)
}

/// Classifies a clipboard payload by its characteristic fields.
///
/// A JSON object with a `poses` array is a category; one with pose
/// fields (`tracking`, `clip`, or `auto_thumbnail`) is a pose. Anything
/// else, non-JSON included, is [`ClipboardKind::Unknown`].
pub fn classify(payload: &str) -> ClipboardKind {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(payload) else {
        return ClipboardKind::Unknown;
    };
    let Some(object) = value.as_object() else {
        return ClipboardKind::Unknown;
    };

    if object.get("poses").is_some_and(|v| v.is_array()) {
        return ClipboardKind::Category;
    }
    if object.contains_key("tracking")
        || object.contains_key("clip")
        || object.contains_key("auto_thumbnail")
    {
        return ClipboardKind::Pose;
    }
    ClipboardKind::Unknown
}

/// Decodes a pose from a clipboard payload.
pub fn paste_pose(payload: &str) -> Result<PoseEntry, LibraryError> {
    if classify(payload) != ClipboardKind::Pose {
        return Err(LibraryError::ClipboardKindMismatch { expected: "pose" });
    }
    serde_json::from_str(payload).map_err(|e| LibraryError::ClipboardDecode(e.to_string()))
}

/// Decodes a category from a clipboard payload.
pub fn paste_category(payload: &str) -> Result<PoseCategory, LibraryError> {
    if classify(payload) != ClipboardKind::Category {
        return Err(LibraryError::ClipboardKindMismatch {
            expected: "category",
        });
    }
    serde_json::from_str(payload).map_err(|e| LibraryError::ClipboardDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_round_trip() {
        let pose = PoseEntry::with_clip("Wave", "Animations/wave.anim");
        let payload = copy_pose(&pose).unwrap();

        assert_eq!(classify(&payload), ClipboardKind::Pose);
        let pasted = paste_pose(&payload).unwrap();
        assert_eq!(pasted, pose);
    }

    #[test]
    fn test_category_round_trip() {
        let category = PoseCategory::with_poses(
            "Sitting",
            vec![PoseEntry::with_clip("Chair", "Animations/chair.anim")],
        );
        let payload = copy_category(&category).unwrap();

        assert_eq!(classify(&payload), ClipboardKind::Category);
        let pasted = paste_category(&payload).unwrap();
        assert_eq!(pasted, category);
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert_eq!(classify(""), ClipboardKind::Unknown);
        assert_eq!(classify("not json at all"), ClipboardKind::Unknown);
        assert_eq!(classify("[1, 2, 3]"), ClipboardKind::Unknown);
        assert_eq!(classify(r#"{"name": "x"}"#), ClipboardKind::Unknown);
    }

    #[test]
    fn test_paste_wrong_kind_fails() {
        let pose = PoseEntry::new("Wave");
        let payload = copy_pose(&pose).unwrap();

        let err = paste_category(&payload).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::ClipboardKindMismatch {
                expected: "category"
            }
        ));
    }

    #[test]
    fn test_paste_malformed_record_fails() {
        // Classified as a category, but poses hold the wrong shape.
        let payload = r#"{"name": "x", "poses": [42]}"#;
        assert_eq!(classify(payload), ClipboardKind::Category);
        let err = paste_category(payload).unwrap_err();
        assert!(matches!(err, LibraryError::ClipboardDecode(_)));
    }

    #[test]
    fn test_empty_category_payload_is_category() {
        let payload = r#"{"name": "empty", "poses": []}"#;
        assert_eq!(classify(payload), ClipboardKind::Category);
        let category = paste_category(payload).unwrap();
        assert!(category.poses.is_empty());
    }
}
