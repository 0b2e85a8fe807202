//! Fuzzy search for filtering lists and tables.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A fuzzy matcher for filtering rows by a search query.
///
/// Wraps [`SkimMatcherV2`] so callers don't depend on the matcher crate
/// directly.
#[derive(Default)]
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Matcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `haystack` fuzzy-matches `needle`.
    ///
    /// An empty needle matches everything.
    #[must_use]
    pub fn matches(&self, haystack: &str, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.inner.fuzzy_match(haystack, needle).is_some()
    }

    /// Returns the match score, or `None` if there is no match.
    #[must_use]
    pub fn score(&self, haystack: &str, needle: &str) -> Option<i64> {
        self.inner.fuzzy_match(haystack, needle)
    }

    /// Returns true if any of the haystacks matches the needle.
    #[must_use]
    pub fn matches_any<'a, I>(&self, haystacks: I, needle: &str) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if needle.is_empty() {
            return true;
        }
        haystacks.into_iter().any(|h| self.matches(h, needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle_matches_everything() {
        let matcher = Matcher::new();
        assert!(matcher.matches("birthday", ""));
        assert!(matcher.matches("", ""));
    }

    #[test]
    fn fuzzy_match_skips_characters() {
        let matcher = Matcher::new();
        assert!(matcher.matches("birthday gifts", "bgif"));
        assert!(!matcher.matches("birthday gifts", "xyz"));
    }

    #[test]
    fn matches_any_checks_all_fields() {
        let matcher = Matcher::new();
        assert!(matcher.matches_any(["wedding", "housewarming"], "house"));
        assert!(!matcher.matches_any(["wedding", "housewarming"], "zzz"));
    }

    #[test]
    fn score_ranks_exact_match_highest() {
        let matcher = Matcher::new();

        let exact = matcher.score("birthday", "birthday").unwrap();
        let fuzzy = matcher.score("birthday gifts", "birthday").unwrap();
        assert!(exact >= fuzzy);

        assert!(matcher.score("birthday", "xyz").is_none());
    }
}
