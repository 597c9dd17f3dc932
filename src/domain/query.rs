use std::sync::LazyLock;

use regex::Regex;

static CITY_QUERY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z \t\n\x0B\f\r\-,.]+$").ok());

/// ASCII letters, ASCII whitespace, hyphens, commas and periods ("St. Louis", "Paris, FR"),
/// with at least two non-blank characters. Runs before any network call.
#[must_use]
pub fn is_valid_input(input: &str) -> bool {
    if input.trim().chars().count() < 2 {
        return false;
    }
    CITY_QUERY
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_city_punctuation() {
        assert!(is_valid_input("London"));
        assert!(is_valid_input("St. Louis"));
        assert!(is_valid_input("Paris, France"));
        assert!(is_valid_input("Stratford-upon-Avon"));
        assert!(is_valid_input("  Rome  "));
    }

    #[test]
    fn rejects_short_or_blank_input() {
        assert!(!is_valid_input(""));
        assert!(!is_valid_input("   "));
        assert!(!is_valid_input("a"));
        assert!(!is_valid_input(" b "));
    }

    #[test]
    fn rejects_digits_and_symbols() {
        assert!(!is_valid_input("10001"));
        assert!(!is_valid_input("Berlin!"));
        assert!(!is_valid_input("Oslo|Bergen"));
        assert!(!is_valid_input("Zürich"));
    }

    #[test]
    fn rejects_non_ascii_whitespace() {
        assert!(!is_valid_input("New\u{00A0}York"));
        assert!(!is_valid_input("Rio\u{2003}Branco"));
        assert!(is_valid_input("New\tYork"));
    }
}
