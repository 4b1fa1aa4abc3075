//! Identifier normalization per [`crate::model::Normalization`] and
//! [`crate::model::CaseSensitivity`].
//!
//! Normalization and case-folding are orthogonal knobs on the profile:
//! `normalization.mode` decides the canonical spelling, `case_sensitivity`
//! decides whether comparisons (stop-word lookup, declared-set membership,
//! symbol grouping) fold case on top of that. Both are applied by
//! [`normalize_key`]; callers that need to preserve the original spelling of
//! the *first* occurrence (per `preserve_original_spelling`) keep the raw
//! text separately and only use the normalized key for comparison/grouping.

use unicode_normalization::UnicodeNormalization;

use crate::model::{CaseSensitivity, LanguageProfile, NormalizationMode};

/// Computes the comparison/grouping key for `raw` under `profile`.
pub fn normalize_key(raw: &str, profile: &LanguageProfile) -> String {
    let mut s = match profile.normalization.mode {
        NormalizationMode::None => raw.to_string(),
        NormalizationMode::Nfkc => raw.nfc().collect::<String>().nfkc().collect::<String>(),
        NormalizationMode::LowercaseAscii => raw.to_ascii_lowercase(),
    };
    if profile.case_sensitivity == CaseSensitivity::Insensitive {
        s = s.to_lowercase();
    }
    s
}

/// Resolves the identifier text that is actually stored/displayed for a
/// symbol, given the key's first-seen raw spelling.
pub fn display_identifier(first_seen_raw: &str, key: &str, profile: &LanguageProfile) -> String {
    if profile.normalization.preserve_original_spelling {
        first_seen_raw.to_string()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Normalization, NormalizationMode};

    fn profile_with(mode: NormalizationMode, case: CaseSensitivity, preserve: bool) -> LanguageProfile {
        crate::test_support::minimal_profile(|p| {
            p.normalization = Normalization {
                mode,
                preserve_original_spelling: preserve,
            };
            p.case_sensitivity = case;
        })
    }

    #[test]
    fn case_insensitive_folds() {
        let p = profile_with(NormalizationMode::None, CaseSensitivity::Insensitive, true);
        assert_eq!(normalize_key("Foo", &p), normalize_key("foo", &p));
    }

    #[test]
    fn lowercase_ascii_mode_folds_without_insensitivity() {
        let p = profile_with(NormalizationMode::LowercaseAscii, CaseSensitivity::Sensitive, true);
        assert_eq!(normalize_key("FOO", &p), "foo");
    }

    #[test]
    fn preserve_original_spelling_keeps_first_seen() {
        let p = profile_with(NormalizationMode::None, CaseSensitivity::Insensitive, true);
        let key = normalize_key("Foo", &p);
        assert_eq!(display_identifier("Foo", &key, &p), "Foo");
    }

    #[test]
    fn drop_original_spelling_uses_key() {
        let p = profile_with(NormalizationMode::None, CaseSensitivity::Insensitive, false);
        let key = normalize_key("Foo", &p);
        assert_eq!(display_identifier("Foo", &key, &p), key);
    }
}
