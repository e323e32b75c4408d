//! Canonical content hashing.
//!
//! The determinism policy for pose libraries:
//! - Document canonicalization using RFC 8785 (JCS)
//! - BLAKE3 digests rendered as lowercase hex
//! - Truncation to [`CONTENT_HASH_LEN`] for the short content hash
//!
//! The short hash identifies a document's authored content. It seeds
//! generated parameter names and keys the build cache, so identical field
//! values and ordering must always produce an identical hash.

use crate::error::LibraryError;
use crate::library::PoseLibrary;

/// Length of the truncated content hash in hex characters.
pub const CONTENT_HASH_LEN: usize = 10;

/// Computes the truncated canonical hash of a library document.
///
/// ```text
/// content_hash = hex(BLAKE3(JCS(document_json)))[..CONTENT_HASH_LEN]
/// ```
///
/// Derived fields (`guid`, pose assignments) are excluded from
/// serialization, so running the allocator never changes the hash.
///
/// # Example
/// ```
/// use poselib_core::{PoseLibrary, hash::library_content_hash};
///
/// let library = PoseLibrary::builder("photo-poses").build();
/// let hash = library_content_hash(&library).unwrap();
/// assert_eq!(hash.len(), 10);
/// ```
pub fn library_content_hash(library: &PoseLibrary) -> Result<String, LibraryError> {
    let value = library.to_value()?;
    let mut hex = canonical_value_hash(&value);
    hex.truncate(CONTENT_HASH_LEN);
    Ok(hex)
}

/// Computes the full 64-character canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Computes a BLAKE3 hash of arbitrary bytes as lowercase hex.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys sorted lexicographically, no whitespace between tokens,
/// minimal string escaping, JCS number formatting.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => write_jcs_number(n, out),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
    }
}

fn write_jcs_number(n: &serde_json::Number, out: &mut String) {
    if let Some(i) = n.as_i64() {
        out.push_str(&i.to_string());
        return;
    }
    if let Some(u) = n.as_u64() {
        out.push_str(&u.to_string());
        return;
    }
    let Some(f) = n.as_f64() else {
        out.push_str("null");
        return;
    };
    // JCS treats non-finite numbers as null.
    if f.is_nan() || f.is_infinite() {
        out.push_str("null");
        return;
    }
    if f == 0.0 {
        out.push('0');
        return;
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        out.push_str(&(f as i64).to_string());
        return;
    }
    let s = format!("{}", f);
    if s.contains('.') && !s.contains('e') && !s.contains('E') {
        out.push_str(s.trim_end_matches('0').trim_end_matches('.'));
    } else {
        out.push_str(&s);
    }
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{PoseCategory, PoseEntry};

    fn sample_library() -> PoseLibrary {
        PoseLibrary::builder("Photo Poses")
            .category(PoseCategory::with_poses(
                "Sitting",
                vec![
                    PoseEntry::with_clip("Chair", "Animations/chair.anim"),
                    PoseEntry::with_clip("Floor", "Animations/floor.anim"),
                ],
            ))
            .build()
    }

    #[test]
    fn test_content_hash_length_and_stability() {
        let library = sample_library();
        let hash1 = library_content_hash(&library).unwrap();
        let hash2 = library_content_hash(&library).unwrap();

        assert_eq!(hash1.len(), CONTENT_HASH_LEN);
        assert_eq!(hash1, hash2, "hash should be stable across calls");
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cosmetic_change_changes_hash() {
        let library = sample_library();
        let mut renamed = library.clone();
        renamed.categories[0].poses[0].name = "Stool".into();

        let hash1 = library_content_hash(&library).unwrap();
        let hash2 = library_content_hash(&renamed).unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_pose_order_changes_hash() {
        let library = sample_library();
        let mut reordered = library.clone();
        reordered.categories[0].poses.swap(0, 1);

        assert_ne!(
            library_content_hash(&library).unwrap(),
            library_content_hash(&reordered).unwrap()
        );
    }

    #[test]
    fn test_derived_fields_do_not_affect_hash() {
        let library = sample_library();
        let before = library_content_hash(&library).unwrap();

        let mut allocated = library.clone();
        crate::alloc::update_parameters(&mut allocated).unwrap();
        assert!(allocated.guid.is_some());

        let after = library_content_hash(&allocated).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_library_hashes() {
        let library = PoseLibrary::default();
        let hash = library_content_hash(&library).unwrap();
        assert_eq!(hash.len(), CONTENT_HASH_LEN);
    }

    #[test]
    fn test_canonicalize_json_object_ordering() {
        let json1: serde_json::Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let json2: serde_json::Value = serde_json::from_str(r#"{"a": 2, "b": 1}"#).unwrap();

        assert_eq!(canonicalize_json(&json1), canonicalize_json(&json2));
        assert_eq!(canonicalize_json(&json1), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_canonicalize_json_nested() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": [1, 2, 3], "a": {"c": true, "b": false}}"#).unwrap();

        assert_eq!(
            canonicalize_json(&json),
            r#"{"a":{"b":false,"c":true},"z":[1,2,3]}"#
        );
    }

    #[test]
    fn test_canonicalize_json_strings() {
        let json: serde_json::Value = serde_json::from_str(r#"{"text": "hello\nworld"}"#).unwrap();
        assert_eq!(canonicalize_json(&json), r#"{"text":"hello\nworld"}"#);
    }

    #[test]
    fn test_canonicalize_numbers() {
        let json: serde_json::Value = serde_json::from_str(r#"[1.5, 2.0, 0.0, -3]"#).unwrap();
        assert_eq!(canonicalize_json(&json), "[1.5,2,0,-3]");
    }

    #[test]
    fn test_blake3_hash_known_value() {
        // Verified with: echo -n "hello world" | b3sum
        assert_eq!(
            blake3_hash(b"hello world"),
            "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
        );
    }
}
