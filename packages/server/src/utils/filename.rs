/// Result of validating an upload folder.
#[derive(Debug, PartialEq, Eq)]
pub enum FolderError {
    /// Folder starts with `/`.
    Absolute,
    /// Folder contains a backslash.
    Backslash,
    /// Folder contains `..` as a path component.
    PathTraversal,
    /// Folder contains an empty or `.` segment (e.g. `a//b`).
    EmptySegment,
    /// Folder contains control characters (CR, LF, NUL, etc.).
    ControlCharacter,
    TooLong,
}

impl FolderError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Absolute => "Invalid folder: must not start with '/'",
            Self::Backslash => "Invalid folder: backslashes are not allowed",
            Self::PathTraversal => "Invalid folder: '..' is not allowed",
            Self::EmptySegment => "Invalid folder: empty path segments are not allowed",
            Self::ControlCharacter => "Invalid folder: control characters are not allowed",
            Self::TooLong => "Invalid folder: exceeds maximum length of 256 characters",
        }
    }
}

const MAX_FOLDER_LEN: usize = 256;

/// Validates a caller-supplied upload folder and returns it trimmed, without
/// a trailing `/`.
///
/// Callers substitute their default folder for blank input before calling.
pub fn validate_folder(folder: &str) -> Result<&str, FolderError> {
    let trimmed = folder.trim().trim_end_matches('/');

    if trimmed.len() > MAX_FOLDER_LEN {
        return Err(FolderError::TooLong);
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(FolderError::ControlCharacter);
    }

    if trimmed.starts_with('/') {
        return Err(FolderError::Absolute);
    }

    if trimmed.contains('\\') {
        return Err(FolderError::Backslash);
    }

    if contains_path_traversal(trimmed) {
        return Err(FolderError::PathTraversal);
    }

    if trimmed.split('/').any(|seg| seg.is_empty() || seg == ".") {
        return Err(FolderError::EmptySegment);
    }

    Ok(trimmed)
}

/// Checks if a path string contains path traversal patterns.
pub fn contains_path_traversal(path: &str) -> bool {
    path.split(['/', '\\']).any(|seg| seg == "..")
}
