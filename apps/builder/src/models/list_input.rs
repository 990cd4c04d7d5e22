/// Splits a comma-separated form field into trimmed values.
/// Empty segments (trailing or doubled commas) are dropped.
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_whitespace() {
        assert_eq!(
            split_comma_list("React, Node.js,  TypeScript"),
            vec!["React", "Node.js", "TypeScript"]
        );
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(split_comma_list("Go,, Rust, "), vec!["Go", "Rust"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_comma_list("").is_empty());
        assert!(split_comma_list(" , ").is_empty());
    }
}
