//! Effective-options layering: built-in defaults < profile `symbol_policy`
//! < explicit override. See SPEC_FULL.md §3/§4.3 ("Policy resolution") and
//! the precedence model in `codegraph-prep::config::model::GraphConfig`
//! (grouped config struct + explicit override application), which this
//! module follows in shape.

use crate::model::{LanguageProfile, Ordering, QualifiedIdentifiers, SymbolPolicy};

/// Caller-supplied overrides, mirroring the external CLI surface (§6). Every
/// field is `None` by default, meaning "defer to the profile/built-in
/// default".
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub symbol_policy_override: Option<crate::model::SymbolPolicyMode>,
    pub single_letter_override: Option<bool>,
    pub qualified_override: Option<QualifiedIdentifiers>,
    pub include_headers_override: Option<bool>,
    /// RFC3339 timestamp to stamp into `generated_at`; `None` uses the
    /// current time at emission (injectable for reproducible tests).
    pub generated_at: Option<String>,
    pub ordering: Ordering,
}

/// Resolves the effective [`SymbolPolicy`] for a run: explicit override wins
/// over the profile's `symbol_policy`, which wins over the built-in default
/// (`{mode: all, exclude_single_letter: false, qualified: none,
/// include_headers: false}`).
pub fn effective_policy(profile: &LanguageProfile, opts: &IndexOptions) -> SymbolPolicy {
    let base = profile.symbol_policy.unwrap_or_default();
    SymbolPolicy {
        mode: opts.symbol_policy_override.unwrap_or(base.mode),
        exclude_single_letter_identifiers: opts
            .single_letter_override
            .unwrap_or(base.exclude_single_letter_identifiers),
        include_qualified_identifiers: opts
            .qualified_override
            .unwrap_or(base.include_qualified_identifiers),
        include_include_headers: opts
            .include_headers_override
            .unwrap_or(base.include_include_headers),
    }
}

/// Resolves the timestamp to stamp into `generated_at`.
pub fn effective_generated_at(opts: &IndexOptions) -> String {
    opts.generated_at
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolPolicyMode;
    use crate::test_support::minimal_profile;

    #[test]
    fn override_wins_over_profile() {
        let profile = minimal_profile(|p| {
            p.symbol_policy = Some(SymbolPolicy {
                mode: SymbolPolicyMode::All,
                ..SymbolPolicy::default()
            });
        });
        let opts = IndexOptions {
            symbol_policy_override: Some(SymbolPolicyMode::Declared),
            ..Default::default()
        };
        assert_eq!(effective_policy(&profile, &opts).mode, SymbolPolicyMode::Declared);
    }

    #[test]
    fn profile_wins_over_builtin_default() {
        let profile = minimal_profile(|p| {
            p.symbol_policy = Some(SymbolPolicy {
                mode: SymbolPolicyMode::Declared,
                ..SymbolPolicy::default()
            });
        });
        let opts = IndexOptions::default();
        assert_eq!(effective_policy(&profile, &opts).mode, SymbolPolicyMode::Declared);
    }

    #[test]
    fn builtin_default_when_profile_silent() {
        let profile = minimal_profile(|p| p.symbol_policy = None);
        let opts = IndexOptions::default();
        assert_eq!(effective_policy(&profile, &opts).mode, SymbolPolicyMode::All);
    }

    #[test]
    fn injected_timestamp_is_used_verbatim() {
        let opts = IndexOptions {
            generated_at: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(effective_generated_at(&opts), "2024-01-01T00:00:00Z");
    }
}
