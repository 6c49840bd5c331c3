//! # Attachment Validation
//!
//! Size and media-type checks applied to user-supplied files before they are
//! admitted to a model request. Validation runs on declared metadata so a
//! rejected file never has its bytes buffered.

use crate::errors::FileError;

/// Ceiling on a single attachment's size.
pub const MAX_ATTACHMENT_BYTES: usize = 50 * 1024 * 1024;

/// Media types the model provider accepts for inline data.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
    "application/pdf",
    "text/plain",
    "text/markdown",
    "text/csv",
    "audio/wav",
    "audio/mp3",
    "audio/ogg",
    "audio/flac",
    "video/mp4",
    "video/webm",
    "video/mov",
];

/// A user-supplied file accompanying a diagnosis request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Normalizes a declared media type: lowercase, parameters after `;` dropped.
fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Checks a declared media type against the allow-list.
pub fn is_allowed_media_type(media_type: &str) -> bool {
    let normalized = normalize_media_type(media_type);
    ALLOWED_MEDIA_TYPES.contains(&normalized.as_str())
}

/// Empty uploads from a blank file input arrive as zero-byte parts with no
/// meaningful filename; those are skipped, not rejected.
pub fn is_empty_placeholder(file_name: &str, size: usize) -> bool {
    size == 0 && file_name.trim().is_empty()
}

/// Validates one attachment's declared metadata.
///
/// The size check runs first so an oversized file is reported as such even
/// when its media type is also unsupported.
pub fn validate_descriptor(
    file_name: &str,
    media_type: &str,
    size: usize,
) -> Result<(), FileError> {
    if size > MAX_ATTACHMENT_BYTES {
        return Err(FileError::TooLarge {
            file_name: file_name.to_string(),
            size,
        });
    }
    if !is_allowed_media_type(media_type) {
        return Err(FileError::UnsupportedType {
            file_name: file_name.to_string(),
            media_type: media_type.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_file_is_rejected_regardless_of_type() {
        for media_type in ["image/png", "application/zip"] {
            let err =
                validate_descriptor("big.bin", media_type, MAX_ATTACHMENT_BYTES + 1).unwrap_err();
            assert!(matches!(err, FileError::TooLarge { size, .. } if size == MAX_ATTACHMENT_BYTES + 1));
        }
    }

    #[test]
    fn size_at_ceiling_passes() {
        assert!(validate_descriptor("ok.png", "image/png", MAX_ATTACHMENT_BYTES).is_ok());
    }

    #[test]
    fn unsupported_type_is_rejected_regardless_of_size() {
        for size in [0, 1, 1024] {
            let err = validate_descriptor("a.zip", "application/zip", size).unwrap_err();
            assert!(matches!(err, FileError::UnsupportedType { .. }));
        }
    }

    #[test]
    fn media_type_check_ignores_case_and_parameters() {
        assert!(is_allowed_media_type("Image/PNG"));
        assert!(is_allowed_media_type("text/plain; charset=utf-8"));
        assert!(!is_allowed_media_type("application/octet-stream"));
    }

    #[test]
    fn empty_placeholder_detection() {
        assert!(is_empty_placeholder("", 0));
        assert!(is_empty_placeholder("  ", 0));
        assert!(!is_empty_placeholder("notes.txt", 0));
        assert!(!is_empty_placeholder("", 1));
    }
}
