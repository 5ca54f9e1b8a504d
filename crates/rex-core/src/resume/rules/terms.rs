//! Term matching and small text helpers shared by the rules.

use super::patterns::BULLET;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Find `term` in `haystack` where neither neighbour is a letter or digit.
///
/// Both arguments must already be lowercase. Returns the byte offset of the
/// first bounded occurrence.
pub fn find_term(haystack: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(term) {
        let start = from + offset;
        let end = start + term.len();

        let before_ok = haystack[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
        let after_ok = haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return Some(start);
        }

        // Advance past the first char of this occurrence
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }

    None
}

/// Whether `term` occurs in `haystack` on term boundaries.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    find_term(haystack, term).is_some()
}

/// Whether any of `terms` occurs in `haystack` on term boundaries.
pub fn contains_any_term(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(haystack, term))
}

/// Remove a leading list bullet or number.
pub fn strip_bullet(line: &str) -> &str {
    let rest = match BULLET.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    };
    rest.trim()
}

/// Capitalise words written entirely in lowercase; leave other words alone.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            if word.chars().any(char::is_uppercase) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_term_respects_boundaries() {
        assert_eq!(find_term("python, java", "java"), Some(8));
        assert_eq!(find_term("javascript", "java"), None);
        assert_eq!(find_term("mastered git", "master"), None);
        assert_eq!(find_term("c++ and c#", "c++"), Some(0));
        assert_eq!(find_term("c++ and c#", "c#"), Some(8));
        assert_eq!(find_term("ci/cd pipeline", "ci/cd"), Some(0));
    }

    #[test]
    fn test_find_term_skips_unbounded_occurrences() {
        assert_eq!(find_term("restful rest api", "rest"), Some(8));
        assert_eq!(find_term("café git", "git"), Some(6));
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- Programming: Python"), "Programming: Python");
        assert_eq!(strip_bullet("• Rust"), "Rust");
        assert_eq!(strip_bullet("Plain line "), "Plain line");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("gRPC services"), "gRPC Services");
    }
}
