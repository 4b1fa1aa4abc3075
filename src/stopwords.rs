//! Builds the normalized stop-word set from a profile's `stop_words` rule.
//!
//! Per spec.md §4.3 step 2: `inline` mode uses the listed words; any other
//! mode (`uri`, `none`) currently produces an empty set — fetching a remote
//! word list is left to a future iteration, not implemented here.

use std::collections::HashSet;

use crate::model::{LanguageProfile, StopWordsMode};
use crate::normalize::normalize_key;

pub fn build_stop_words(profile: &LanguageProfile) -> HashSet<String> {
    match profile.stop_words.mode {
        StopWordsMode::Inline => profile
            .stop_words
            .words
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|w| normalize_key(w, profile))
            .collect(),
        StopWordsMode::Uri | StopWordsMode::None => HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::profile_with_stop_words;

    #[test]
    fn inline_words_are_normalized_and_collected() {
        let profile = profile_with_stop_words(&["if", "else", "while"]);
        let stop = build_stop_words(&profile);
        assert_eq!(stop.len(), 3);
        assert!(stop.contains("if"));
    }

    #[test]
    fn uri_mode_is_empty_for_now() {
        let profile = crate::test_support::minimal_profile(|p| {
            p.stop_words = crate::model::StopWordsRule {
                mode: StopWordsMode::Uri,
                words: None,
                uri: Some("https://example.invalid/stopwords.txt".to_string()),
            };
        });
        assert!(build_stop_words(&profile).is_empty());
    }
}
