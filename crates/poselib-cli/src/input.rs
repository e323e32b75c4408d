//! Loading library documents from disk.
//!
//! Loading dispatches by file extension and returns the parsed document
//! together with a hash of the raw source bytes, so callers can report
//! exactly which file contents produced a result.

use poselib_core::PoseLibrary;
use std::path::{Path, PathBuf};

/// Recognized document extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a library document.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed document.
    pub library: PoseLibrary,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during document loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// Document failed to parse.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown document extension: .{}", ext),
                None => write!(f, "document path has no extension"),
            },
            InputError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::UnknownExtension { .. } => None,
            InputError::Parse { source, .. } => Some(source),
        }
    }
}

/// Loads a library document from a file.
pub fn load_library(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => {}
        other => {
            return Err(InputError::UnknownExtension {
                extension: other.map(String::from),
            })
        }
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let library = PoseLibrary::from_json(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadResult {
        library,
        source_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_library_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(
            &path,
            r#"{ "name": "Loaded", "categories": [{ "name": "c", "poses": [] }] }"#,
        )
        .unwrap();

        let result = load_library(&path).unwrap();
        assert_eq!(result.library.name, "Loaded");
        assert_eq!(result.source_hash.len(), 64);
    }

    #[test]
    fn test_unknown_extension() {
        let err = load_library(Path::new("library.yaml")).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownExtension {
                extension: Some(ref e)
            } if e == "yaml"
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_library(Path::new("/no/such/library.json")).unwrap_err();
        assert!(matches!(err, InputError::FileRead { .. }));
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_library(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
