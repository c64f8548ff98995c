/// Percent-encode a value for use as a single URL path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Only same-site absolute paths are accepted as redirect targets.
pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_keeps_ids() {
        assert_eq!(segment("a0b1-c2_d3.e~"), "a0b1-c2_d3.e~");
    }

    #[test]
    fn test_segment_escapes_separators() {
        assert_eq!(segment("a/b c?"), "a%2Fb%20c%3F");
    }

    #[test]
    fn test_local_path() {
        assert!(is_local_path("/cla/gerrit/project/p1/corporate"));
        assert!(!is_local_path("//evil.example.org"));
        assert!(!is_local_path("https://evil.example.org"));
        assert!(!is_local_path(""));
    }
}
