//! Media type <-> file extension mapping.
//!
//! Used to name display files after retrieval and to label uploads when the
//! user selects a file from disk.

use std::path::Path;

/// Fallback media type for bytes we cannot label.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension (without dot) for a media type; parameters such as `; charset=utf-8`
/// are ignored. Unknown types map to `bin`.
///
/// When the type has several registered extensions the one matching the
/// subtype wins (`image/jpeg` -> `jpeg`), otherwise the first listed.
pub fn extension_for_media_type(media_type: &str) -> &'static str {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let Some(exts) = mime_guess::get_mime_extensions_str(&essence) else {
        return "bin";
    };
    let subtype = essence.split('/').nth(1).unwrap_or("");
    exts.iter()
        .copied()
        .find(|e| *e == subtype)
        .or_else(|| exts.first().copied())
        .unwrap_or("bin")
}

/// Media type guessed from a path's extension; unknown extensions map to
/// `application/octet-stream`.
pub fn media_type_for_path(path: &Path) -> &'static str {
    mime_guess::from_path(path).first_raw().unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ignores_parameters_and_case() {
        assert_eq!(extension_for_media_type("image/png"), "png");
        assert_eq!(extension_for_media_type("Image/PNG; charset=binary"), "png");
        assert_ne!(extension_for_media_type("text/plain; charset=utf-8"), "bin");
        assert_eq!(extension_for_media_type("application/x-unknown"), "bin");
        assert_eq!(extension_for_media_type(""), "bin");
    }

    #[test]
    fn extension_prefers_subtype_name() {
        assert_eq!(extension_for_media_type("image/jpeg"), "jpeg");
        assert_eq!(extension_for_media_type("video/webm"), "webm");
        assert_eq!(extension_for_media_type("text/csv"), "csv");
        assert_eq!(extension_for_media_type("application/pdf"), "pdf");
    }

    #[test]
    fn media_type_from_path() {
        assert_eq!(media_type_for_path(Path::new("cat.PNG")), "image/png");
        assert_eq!(media_type_for_path(Path::new("/tmp/photo.jpeg")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("clip.webm")), "video/webm");
        assert_eq!(media_type_for_path(Path::new("data.csv")), "text/csv");
        assert_eq!(media_type_for_path(Path::new("notes")), OCTET_STREAM);
        assert_eq!(media_type_for_path(Path::new("a.xyz123")), OCTET_STREAM);
    }
}
