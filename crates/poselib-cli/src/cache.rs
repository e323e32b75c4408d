//! Content-addressed caching for built avatar artifacts.
//!
//! Rebuilding a pose library's animator assets is expensive, so builds
//! are cached keyed by:
//! - The document's truncated content hash
//! - The builder version string
//!
//! Cache entries are stored in an XDG-compatible directory structure.
//! Disabling a library's use-cache toggle invalidates every entry
//! recorded for that document's hash.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cache key components for deterministic cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    /// Truncated content hash of the library document
    pub content_hash: String,
    /// Builder version string
    pub builder_version: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(content_hash: impl Into<String>, builder_version: impl Into<String>) -> Self {
        Self {
            content_hash: content_hash.into(),
            builder_version: builder_version.into(),
        }
    }

    /// Compute the cache entry hash (deterministic cache directory name)
    pub fn entry_hash(&self) -> String {
        let canonical = format!(
            "content:{},builder:{}",
            self.content_hash, self.builder_version
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Cache manifest stored alongside cached artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Cache key components
    pub key: CacheKey,
    /// Timestamp when this entry was created
    pub created_at: String,
    /// Relative paths of the cached artifact files
    pub files: Vec<String>,
}

/// Cache manager for reading/writing built artifacts
pub struct BuildCache {
    cache_dir: PathBuf,
}

impl BuildCache {
    /// Create a build cache using the default XDG cache directory
    pub fn new() -> Result<Self> {
        let cache_dir = Self::default_cache_dir().context("Failed to determine cache directory")?;
        Ok(Self { cache_dir })
    }

    /// Create a build cache rooted at an explicit directory
    pub fn at(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Get the default cache directory (XDG-compatible)
    pub fn default_cache_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("poselib").join("build"))
    }

    /// Get the path to a cache entry directory
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.cache", key.entry_hash()))
    }

    /// Check if a cache entry exists
    pub fn has_entry(&self, key: &CacheKey) -> bool {
        self.entry_path(key).join("manifest.json").exists()
    }

    /// Retrieve cached artifacts into `out_root` (returns None on miss)
    pub fn get(&self, key: &CacheKey, out_root: &Path) -> Result<Option<Vec<PathBuf>>> {
        let entry_path = self.entry_path(key);
        let manifest_path = entry_path.join("manifest.json");

        if !manifest_path.exists() {
            return Ok(None);
        }

        let manifest_json =
            fs::read_to_string(&manifest_path).context("Failed to read cache manifest")?;
        let manifest: CacheManifest =
            serde_json::from_str(&manifest_json).context("Failed to parse cache manifest")?;

        let mut outputs = Vec::new();
        for file in &manifest.files {
            let cache_file = entry_path.join(file);
            let output_path = out_root.join(file);

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }

            fs::copy(&cache_file, &output_path)
                .with_context(|| format!("Failed to copy cached file: {}", cache_file.display()))?;

            outputs.push(PathBuf::from(file));
        }

        Ok(Some(outputs))
    }

    /// Store artifacts in the cache. `files` are paths relative to `root`.
    pub fn put(&self, key: &CacheKey, files: &[PathBuf], root: &Path) -> Result<()> {
        let entry_path = self.entry_path(key);

        fs::create_dir_all(&entry_path).with_context(|| {
            format!(
                "Failed to create cache entry directory: {}",
                entry_path.display()
            )
        })?;

        let mut cached_files = Vec::new();
        for file in files {
            let relative = file.to_string_lossy().to_string();
            let actual_file = root.join(file);

            let cache_file = entry_path.join(&relative);
            if let Some(parent) = cache_file.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create cache subdirectory: {}", parent.display())
                })?;
            }

            fs::copy(&actual_file, &cache_file).with_context(|| {
                format!("Failed to copy file to cache: {}", actual_file.display())
            })?;

            cached_files.push(relative);
        }

        let manifest = CacheManifest {
            key: key.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            files: cached_files,
        };

        let manifest_json = serde_json::to_string_pretty(&manifest)
            .context("Failed to serialize cache manifest")?;
        fs::write(entry_path.join("manifest.json"), manifest_json)
            .context("Failed to write cache manifest")?;

        Ok(())
    }

    /// Remove every entry recorded for a content hash
    pub fn invalidate(&self, content_hash: &str) -> Result<u64> {
        let mut count = 0u64;
        for path in self.entry_dirs()? {
            let manifest_path = path.join("manifest.json");
            let Ok(manifest_json) = fs::read_to_string(&manifest_path) else {
                continue;
            };
            let Ok(manifest) = serde_json::from_str::<CacheManifest>(&manifest_json) else {
                continue;
            };
            if manifest.key.content_hash == content_hash {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove cache entry: {}", path.display()))?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Clear all cache entries
    pub fn clear(&self) -> Result<u64> {
        let mut count = 0u64;
        for path in self.entry_dirs()? {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove cache entry: {}", path.display()))?;
            count += 1;
        }
        Ok(count)
    }

    /// Get cache info (total entries, total size)
    pub fn info(&self) -> Result<CacheInfo> {
        let mut entry_count = 0u64;
        let mut total_size_bytes = 0u64;

        for path in self.entry_dirs()? {
            entry_count += 1;
            total_size_bytes += Self::dir_size(&path)?;
        }

        Ok(CacheInfo {
            cache_dir: self.cache_dir.clone(),
            entry_count,
            total_size_bytes,
        })
    }

    /// Cache entry directories currently on disk
    fn entry_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.cache_dir.exists() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.cache_dir).context("Failed to read cache directory")? {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path.is_dir() && path.extension().and_then(|s| s.to_str()) == Some("cache") {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }

    /// Compute total size of a directory (recursive)
    fn dir_size(path: &Path) -> Result<u64> {
        let mut total = 0u64;

        for entry in walkdir::WalkDir::new(path) {
            let entry = entry.context("Failed to walk directory")?;
            if entry.file_type().is_file() {
                total += entry.metadata()?.len();
            }
        }

        Ok(total)
    }
}

/// Cache information
#[derive(Debug, Clone)]
pub struct CacheInfo {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Number of cache entries
    pub entry_count: u64,
    /// Total size in bytes
    pub total_size_bytes: u64,
}
