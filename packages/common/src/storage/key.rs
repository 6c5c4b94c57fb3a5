use chrono::Utc;
use rand::Rng;

use super::error::StorageError;

/// Length of the random token appended to every generated key.
pub const SUFFIX_LEN: usize = 6;

/// Longest key any backend accepts.
pub const MAX_KEY_LEN: usize = 1024;

const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercased text after the last `.` of a filename.
///
/// A name without a dot yields the whole name, lowercased.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Draw a short lowercase base-36 token.
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Assemble `{folder}/{timestamp}-{suffix}.{extension}`.
pub fn object_key(folder: &str, timestamp_millis: i64, suffix: &str, extension: &str) -> String {
    format!("{folder}/{timestamp_millis}-{suffix}.{extension}")
}

/// Generate a fresh key for an upload of `original_name` into `folder`.
///
/// Uniqueness rests on the millisecond timestamp plus the random suffix;
/// no collision check is made against the store.
pub fn generate_key(folder: &str, original_name: &str) -> String {
    let suffix = random_suffix(&mut rand::rng());
    object_key(
        folder,
        Utc::now().timestamp_millis(),
        &suffix,
        &file_extension(original_name),
    )
}

/// Reject keys that could escape a directory-backed store.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::InvalidKey(format!(
            "key exceeds {MAX_KEY_LEN} bytes"
        )));
    }
    if key.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidKey(
            "key contains control characters".into(),
        ));
    }
    if key.contains('\\') {
        return Err(StorageError::InvalidKey("key contains backslashes".into()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey("key must not start with '/'".into()));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(
            "key contains an empty or relative segment".into(),
        ));
    }
    Ok(())
}
