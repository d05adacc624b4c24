use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for deciding whether an object key points at an image.
    /// Extension match only, case-insensitive.
    /// - Matches: "photos/a.jpg", "x.PNG", "b.heif"
    /// - Rejects: "notes.txt", "a.jpg.enc", "archive.zip"
    pub static ref IMAGE_KEY_REGEX: Regex =
        Regex::new(r"(?i)\.(jpg|jpeg|png|webp|gif|heic|heif)$").unwrap();
}

/// Whether an object key refers to an image, judged by its extension.
/// Only image keys get preview URLs.
pub fn is_image_key(key: &str) -> bool {
    IMAGE_KEY_REGEX.is_match(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_matches() {
        assert!(is_image_key("photos/2025/06/15/a.jpg"));
        assert!(is_image_key("a.jpeg"));
        assert!(is_image_key("a.PNG"));
        assert!(is_image_key("a.WebP"));
        assert!(is_image_key("a.gif"));
        assert!(is_image_key("a.heic"));
        assert!(is_image_key("a.HEIF"));
    }

    #[test]
    fn test_image_key_rejects() {
        assert!(!is_image_key("notes.txt"));
        assert!(!is_image_key("a.jpg.enc"));
        assert!(!is_image_key("jpg"));
        assert!(!is_image_key("photos/clip.mp4"));
        assert!(!is_image_key(""));
    }
}
