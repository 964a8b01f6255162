/// Minimum length of a shared token for the token rule to fire
///
/// Tokens of one or two characters ("a", "of", "de") overlap constantly in
/// ingredient names without meaning anything; requiring length > 2 keeps
/// multi-word names matchable while skipping those. The rule remains
/// permissive on purpose and accepts some false positives for common short
/// words.
const MIN_SHARED_TOKEN_LEN: usize = 3;

/// Normalize an ingredient name for comparison: trimmed and lowercased
#[inline]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fuzzy ingredient-name comparison
///
/// Two names match when, after normalization, they are equal, one contains
/// the other, or they share a whitespace-delimited token of at least
/// `MIN_SHARED_TOKEN_LEN` characters. Symmetric in its arguments.
///
/// # Arguments
/// * `a` - First ingredient name
/// * `b` - Second ingredient name
///
/// # Returns
/// true if the names refer to the same ingredient under the fuzzy rules
pub fn names_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    shares_long_token(&a, &b)
}

/// Token rule: any whitespace-delimited token present in both names with
/// length >= MIN_SHARED_TOKEN_LEN counts as a match
#[inline]
fn shares_long_token(a: &str, b: &str) -> bool {
    a.split_whitespace()
        .filter(|token| token.len() >= MIN_SHARED_TOKEN_LEN)
        .any(|token| b.split_whitespace().any(|other| other == token))
}

/// Check whether a name fuzzy-matches any candidate in a list
#[inline]
pub fn matches_any(name: &str, candidates: &[String]) -> bool {
    candidates.iter().any(|candidate| names_match(name, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_whitespace() {
        assert!(names_match("Chicken", "chicken"));
        assert!(names_match("  feta ", "FETA"));
    }

    #[test]
    fn test_substring_match_is_symmetric() {
        assert!(names_match("chicken breast", "chicken"));
        assert!(names_match("chicken", "chicken breast"));
    }

    #[test]
    fn test_shared_token_match() {
        // "pepper" is shared between two multi-word names where neither
        // contains the other
        assert!(names_match("red bell pepper", "pepper flakes"));
    }

    #[test]
    fn test_short_shared_token_does_not_match() {
        // only the two-character token "de" is shared
        assert!(!names_match("pato de luxe", "crema de"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        assert!(!names_match("chicken", "spinach"));
    }

    #[test]
    fn test_empty_name_never_matches() {
        assert!(!names_match("", "chicken"));
        assert!(!names_match("chicken", "   "));
    }

    #[test]
    fn test_matches_any() {
        let candidates = vec!["chicken".to_string(), "spinach".to_string()];
        assert!(matches_any("chicken breast", &candidates));
        assert!(!matches_any("feta", &candidates));
    }
}
