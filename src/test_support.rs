//! Test-only helpers shared across module test suites.

#![cfg(test)]

use crate::model::{
    CaseSensitivity, CommentSyntax, IdentifierMode, IdentifierRule, LanguageProfile,
    LiteralSyntax, Normalization, NormalizationMode, StopWordsMode, StopWordsRule, SymbolPolicy,
};

/// A profile with sane C-like defaults: `[A-Za-z_][A-Za-z0-9_]*` identifiers,
/// `//` line comments, `/* */` block comments, `"`/`'` literal delimiters,
/// `\` escapes, no stop words. Callers override fields via the closure.
pub fn minimal_profile(customize: impl FnOnce(&mut LanguageProfile)) -> LanguageProfile {
    let mut profile = LanguageProfile {
        profile_id: "test-lang".to_string(),
        name: "Test Language".to_string(),
        version: None,
        case_sensitivity: CaseSensitivity::Sensitive,
        normalization: Normalization {
            mode: NormalizationMode::None,
            preserve_original_spelling: true,
        },
        identifier_rule: IdentifierRule {
            mode: IdentifierMode::Regex,
            pattern: Some(r"[A-Za-z_][A-Za-z0-9_]*".to_string()),
        },
        stop_words: StopWordsRule {
            mode: StopWordsMode::None,
            words: None,
            uri: None,
        },
        comment_syntax: CommentSyntax {
            line_comment_starts: vec!["//".to_string()],
            block_comment_starts: vec!["/*".to_string()],
            block_comment_ends: vec!["*/".to_string()],
        },
        literal_syntax: LiteralSyntax {
            exclude_literals: true,
            string_delims: vec!['"'],
            char_delims: vec!['\''],
            escape_char: '\\',
            allow_multiline_strings: false,
        },
        symbol_policy: Some(SymbolPolicy::default()),
    };
    customize(&mut profile);
    profile
}

/// Same defaults, with an inline stop-word list.
pub fn profile_with_stop_words(words: &[&str]) -> LanguageProfile {
    minimal_profile(|p| {
        p.stop_words = StopWordsRule {
            mode: StopWordsMode::Inline,
            words: Some(words.iter().map(|s| s.to_string()).collect()),
            uri: None,
        };
    })
}
