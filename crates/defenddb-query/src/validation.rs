//! Allow-list validators for command tokens
//!
//! Both predicates are pure and total. "Letter" and "digit" mean ASCII
//! only: the store's interpreter splits the command on bytes, so anything
//! outside ASCII is refused along with punctuation and control characters.

/// Extra characters accepted in restricted tokens besides ASCII letters and digits
pub const ALLOWED_EXTRA_CHARS: &str = "-_ ";

/// Accept a non-empty string made only of ASCII decimal digits
///
/// Used for agent identifiers.
pub fn is_numeric_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Accept a string whose every character is an ASCII letter, an ASCII digit,
/// or one of `extra_chars`
///
/// The empty string is accepted.
pub fn is_restricted_token(s: &str, extra_chars: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || extra_chars.contains(c))
}

/// [`is_restricted_token`] with [`ALLOWED_EXTRA_CHARS`]
pub fn is_allowed_token(s: &str) -> bool {
    is_restricted_token(s, ALLOWED_EXTRA_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_identifier_accepts_digits() {
        assert!(is_numeric_identifier("0"));
        assert!(is_numeric_identifier("001"));
        assert!(is_numeric_identifier("42"));
    }

    #[test]
    fn test_numeric_identifier_rejects_empty() {
        assert!(!is_numeric_identifier(""));
    }

    #[test]
    fn test_numeric_identifier_rejects_non_digits() {
        for s in ["abc", "4a", "-1", "+1", " 1", "1 ", "1.0", "１２"] {
            assert!(!is_numeric_identifier(s), "{:?} should be rejected", s);
        }
    }

    #[test]
    fn test_restricted_token_accepts_allow_list() {
        assert!(is_allowed_token("users"));
        assert!(is_allowed_token("sys_osinfo"));
        assert!(is_allowed_token("agent-info"));
        assert!(is_allowed_token("Windows 10 Pro"));
    }

    #[test]
    fn test_restricted_token_accepts_empty() {
        assert!(is_allowed_token(""));
    }

    #[test]
    fn test_restricted_token_rejects_punctuation() {
        for s in [
            "users;DROP",
            "a'b",
            "a\"b",
            "a/b",
            "a\\b",
            "a\nb",
            "a\tb",
            "a.b",
            "*",
            "a=b",
        ] {
            assert!(!is_allowed_token(s), "{:?} should be rejected", s);
        }
    }

    #[test]
    fn test_restricted_token_rejects_non_ascii_letters() {
        assert!(!is_allowed_token("café"));
        assert!(!is_allowed_token("ｕｓｅｒｓ"));
    }

    #[test]
    fn test_restricted_token_honours_custom_extra_chars() {
        assert!(is_restricted_token("a.b", "."));
        assert!(!is_restricted_token("a-b", "."));
        assert!(!is_restricted_token("a b", ""));
    }
}
