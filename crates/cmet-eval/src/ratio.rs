/// Characters of `original` per character of `compressed`
///
/// An empty compressed text yields 0.0.
pub fn compression_ratio(original: &str, compressed: &str) -> f64 {
    let compressed_len = compressed.chars().count();
    if compressed_len == 0 {
        return 0.0;
    }
    original.chars().count() as f64 / compressed_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(compression_ratio("abcd", "abcd"), 1.0);
        assert_eq!(compression_ratio("abcd", "ab"), 2.0);
        assert_eq!(compression_ratio("abcd", ""), 0.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(compression_ratio("ééé", "é"), 3.0);
    }
}
