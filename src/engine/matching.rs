//! Case-insensitive multi-phrase substring matching

use aho_corasick::{AhoCorasick, MatchKind};

/// Finds which of a fixed set of phrases occur anywhere in a text.
///
/// Matching is substring based and case-insensitive, so "led" is found in
/// "Led the team" and also inside "handled". Blank phrases never match.
pub struct PhraseMatcher {
    phrases: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl PhraseMatcher {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .collect();

        let patterns: Vec<&str> = phrases.iter().map(String::as_str).filter(|p| !p.is_empty()).collect();
        let automaton = if patterns.is_empty() {
            None
        } else {
            match AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&patterns)
            {
                Ok(automaton) => Some(automaton),
                Err(e) => {
                    log::warn!("Falling back to linear phrase search: {}", e);
                    None
                }
            }
        };

        Self { phrases, automaton }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// One flag per phrase, in the order the phrases were given
    pub fn matches(&self, text: &str) -> Vec<bool> {
        let haystack = text.to_lowercase();
        let mut found = vec![false; self.phrases.len()];

        match &self.automaton {
            Some(automaton) => {
                // pattern ids index the non-blank phrases only
                let slots: Vec<usize> = self
                    .phrases
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| !p.is_empty())
                    .map(|(i, _)| i)
                    .collect();
                for mat in automaton.find_overlapping_iter(&haystack) {
                    found[slots[mat.pattern().as_usize()]] = true;
                }
            }
            None => {
                for (slot, phrase) in self.phrases.iter().enumerate() {
                    found[slot] = !phrase.is_empty() && haystack.contains(phrase.as_str());
                }
            }
        }

        found
    }

    /// Number of distinct phrases found in the text
    pub fn count_matched(&self, text: &str) -> usize {
        self.matches(text).into_iter().filter(|m| *m).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_case_insensitive_matches() {
        let matcher = PhraseMatcher::new(["led", "built", "launched"]);
        assert_eq!(matcher.count_matched("LED the team. Led again. Built a thing."), 2);
    }

    #[test]
    fn test_overlapping_substrings_are_all_found() {
        let matcher = PhraseMatcher::new(["developed", "led", "pe"]);
        assert_eq!(matcher.matches("Developed"), vec![true, false, true]);
        assert_eq!(matcher.matches("handled"), vec![false, true, false]);
    }

    #[test]
    fn test_blank_phrases_never_match() {
        let matcher = PhraseMatcher::new(["", "rust", "  "]);
        assert_eq!(matcher.matches("rust and more"), vec![false, true, false]);
        assert_eq!(matcher.len(), 3);
    }

    #[test]
    fn test_non_ascii_phrases() {
        let matcher = PhraseMatcher::new(["Café Management"]);
        assert_eq!(matcher.matches("ran CAFÉ MANAGEMENT for years"), vec![true]);
    }

    #[test]
    fn test_empty_matcher() {
        let matcher = PhraseMatcher::new(Vec::<String>::new());
        assert!(matcher.is_empty());
        assert!(matcher.matches("anything").is_empty());
    }
}
