//! Error types for document validation and processing.

use thiserror::Error;

/// Error codes for document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Library name is empty
    EmptyLibraryName,
    /// E002: Category name is empty
    EmptyCategoryName,
    /// E003: Pose name is empty
    EmptyPoseName,
    /// E004: Pose has no main animation clip
    MissingAnimationClip,
    /// E005: Motion speed is negative
    NegativeMotionSpeed,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::EmptyLibraryName => "E001",
            ErrorCode::EmptyCategoryName => "E002",
            ErrorCode::EmptyPoseName => "E003",
            ErrorCode::MissingAnimationClip => "E004",
            ErrorCode::NegativeMotionSpeed => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for document validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Category contains no poses
    EmptyCategory,
    /// W002: Duplicate pose name within a category
    DuplicatePoseName,
    /// W003: Library has no thumbnail
    MissingThumbnail,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::EmptyCategory => "W001",
            WarningCode::DuplicatePoseName => "W002",
            WarningCode::MissingThumbnail => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "categories\[2\].poses\[0\].clip").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a document path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a document path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for document operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard payload is not the expected record kind.
    #[error("clipboard payload is not a {expected} record")]
    ClipboardKindMismatch {
        /// The record kind the caller asked for.
        expected: &'static str,
    },

    /// Clipboard payload matched a record kind but failed to decode.
    #[error("clipboard payload could not be decoded: {0}")]
    ClipboardDecode(String),
}

/// Result of document validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::EmptyLibraryName.code(), "E001");
        assert_eq!(ErrorCode::MissingAnimationClip.code(), "E004");
        assert_eq!(WarningCode::EmptyCategory.code(), "W001");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::EmptyLibraryName, "library name is empty");
        assert_eq!(err.to_string(), "E001: library name is empty");

        let err_with_path = ValidationError::with_path(
            ErrorCode::MissingAnimationClip,
            "pose has no animation clip",
            "categories[0].poses[2].clip",
        );
        assert_eq!(
            err_with_path.to_string(),
            "E004: pose has no animation clip (at categories[0].poses[2].clip)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(
            WarningCode::MissingThumbnail,
            "no thumbnail",
        ));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(
            ErrorCode::EmptyCategoryName,
            "category 1 has no name",
        ));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
        assert!(result.into_result().is_err());
    }
}
