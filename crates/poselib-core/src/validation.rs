//! Structural validation of library documents.

use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::library::PoseLibrary;

/// Validates a library document.
///
/// Errors mark content that cannot build (missing names, missing clips,
/// invalid playback speeds); warnings mark content that builds but is
/// probably not what the author wanted.
pub fn validate_library(library: &PoseLibrary) -> ValidationResult {
    let mut result = ValidationResult::success();

    if library.name.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyLibraryName,
            "library name is empty",
            "name",
        ));
    }

    if library.thumbnail.is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingThumbnail,
            "library has no thumbnail",
            "thumbnail",
        ));
    }

    for (ci, category) in library.categories.iter().enumerate() {
        let category_path = format!("categories[{}]", ci);

        if category.name.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyCategoryName,
                "category name is empty",
                format!("{}.name", category_path),
            ));
        }

        if category.poses.is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::EmptyCategory,
                format!("category \"{}\" contains no poses", category.name),
                category_path.clone(),
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for (pi, pose) in category.poses.iter().enumerate() {
            let pose_path = format!("{}.poses[{}]", category_path, pi);

            if pose.name.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::EmptyPoseName,
                    "pose name is empty",
                    format!("{}.name", pose_path),
                ));
            } else if seen.contains(&pose.name.as_str()) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::DuplicatePoseName,
                    format!("duplicate pose name \"{}\"", pose.name),
                    format!("{}.name", pose_path),
                ));
            } else {
                seen.push(&pose.name);
            }

            if pose.clip.is_none() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::MissingAnimationClip,
                    format!("pose \"{}\" has no animation clip", pose.name),
                    format!("{}.clip", pose_path),
                ));
            }

            if pose.tracking.motion_speed < 0.0 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::NegativeMotionSpeed,
                    format!(
                        "motion speed {} is negative",
                        pose.tracking.motion_speed
                    ),
                    format!("{}.tracking.motion_speed", pose_path),
                ));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{PoseCategory, PoseEntry};

    fn valid_library() -> PoseLibrary {
        PoseLibrary::builder("Photo Poses")
            .thumbnail("Textures/photo.png")
            .category(PoseCategory::with_poses(
                "Sitting",
                vec![PoseEntry::with_clip("Chair", "Animations/chair.anim")],
            ))
            .build()
    }

    #[test]
    fn test_valid_library_passes() {
        let result = validate_library(&valid_library());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_names_are_errors() {
        let mut library = valid_library();
        library.name = "  ".into();
        library.categories[0].name = String::new();
        library.categories[0].poses[0].name = String::new();

        let result = validate_library(&library);
        assert!(!result.is_ok());

        let codes: Vec<ErrorCode> = result.errors.iter().map(|e| e.code).collect();
        assert!(codes.contains(&ErrorCode::EmptyLibraryName));
        assert!(codes.contains(&ErrorCode::EmptyCategoryName));
        assert!(codes.contains(&ErrorCode::EmptyPoseName));
    }

    #[test]
    fn test_missing_clip_is_error_with_path() {
        let mut library = valid_library();
        library.categories[0].poses[0].clip = None;

        let result = validate_library(&library);
        let error = result
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::MissingAnimationClip)
            .unwrap();
        assert_eq!(error.path.as_deref(), Some("categories[0].poses[0].clip"));
    }

    #[test]
    fn test_negative_motion_speed_is_error() {
        let mut library = valid_library();
        library.categories[0].poses[0].tracking.motion_speed = -0.5;

        let result = validate_library(&library);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::NegativeMotionSpeed));
    }

    #[test]
    fn test_warnings_do_not_fail_validation() {
        let mut library = valid_library();
        library.thumbnail = None;
        library.categories.push(PoseCategory::new("Empty"));
        library.categories[0]
            .poses
            .push(PoseEntry::with_clip("Chair", "Animations/chair2.anim"));

        let result = validate_library(&library);
        assert!(result.is_ok());

        let codes: Vec<WarningCode> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::MissingThumbnail));
        assert!(codes.contains(&WarningCode::EmptyCategory));
        assert!(codes.contains(&WarningCode::DuplicatePoseName));
    }
}
