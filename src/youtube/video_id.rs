use std::sync::OnceLock;
use regex::Regex;

use crate::error::{Error, Result};

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:[?&]v=|youtu\.be/|/shorts/|/embed/|/live/|/v/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
            .expect("video URL pattern is valid")
    })
}

fn bare_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video ID pattern is valid"))
}

/// Pulls the 11-character video ID out of a watch/short/embed URL, or
/// accepts a bare ID.
pub fn extract_video_id(target: &str) -> Result<String> {
    let target = target.trim();
    if target.is_empty() {
        return Err(Error::Input("a video URL or ID is required".to_string()));
    }

    if bare_id_pattern().is_match(target) {
        return Ok(target.to_string());
    }

    url_pattern()
        .captures(target)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::NotFound(format!("no video ID found in '{}'", target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_urls() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://m.youtube.com/live/dQw4w9WgXcQ?feature=shared",
            "  dQw4w9WgXcQ ",
        ];
        for case in cases {
            assert_eq!(extract_video_id(case).unwrap(), "dQw4w9WgXcQ", "{}", case);
        }
    }

    #[test]
    fn test_missing_target_is_input_error() {
        assert!(matches!(extract_video_id("   "), Err(Error::Input(_))));
    }

    #[test]
    fn test_unparseable_target_is_not_found() {
        assert!(matches!(
            extract_video_id("https://www.youtube.com/channel/foo"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            extract_video_id("https://www.youtube.com/watch?v=short"),
            Err(Error::NotFound(_))
        ));
    }
}
