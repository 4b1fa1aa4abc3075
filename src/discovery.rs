//! Declaration discovery: a purely lexical heuristic computing the set of
//! identifiers "declared" (or otherwise admitted by policy) in a file. See
//! SPEC_FULL.md §4.2.
//!
//! This is intentionally not a parser. Rule 3 over-admits relative to any
//! real grammar (e.g. `return foo` reads as a declaration of `foo`) — that
//! is a documented design trade-off (spec.md §9, Open Question), not a bug
//! to be fixed here.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::model::{LanguageProfile, QualifiedIdentifiers, SymbolPolicy, Token, TokenKind};
use crate::normalize::normalize_key;

const RESERVED_MODIFIERS: [&str; 5] = ["public", "private", "protected", "static", "final"];

fn include_directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^[ \t]*#include[ \t]*[<"]([^>"]*)[>"]"#).unwrap())
}

/// Computes the admitted-identifier set for one file.
///
/// `stop` must already contain normalized (per `profile`) stop words. The
/// returned set is also normalized; callers union it across files under the
/// same profile before checking membership (spec.md §4.2: "The admitted set
/// is the union across all input files in a run").
pub fn discover_declarations(
    tokens: &[Token],
    raw_text: &str,
    stop: &HashSet<String>,
    profile: &LanguageProfile,
    policy: &SymbolPolicy,
    id_re: &Regex,
) -> HashSet<String> {
    let mut admitted = HashSet::new();
    let norm = |s: &str| normalize_key(s, profile);
    let is_stop = |s: &str| stop.contains(&norm(s));

    let idents: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .collect();
    trace!(
        profile = %profile.profile_id,
        token_count = tokens.len(),
        identifier_count = idents.len(),
        "discovery: starting pass"
    );

    // Rule 1 & 2: `package Name` / `class Name`.
    for pair in idents.windows(2) {
        let (kw, name) = (pair[0], pair[1]);
        let kw_norm = norm(&kw.text);
        if (kw_norm == "package" || kw_norm == "class") && !is_stop(&name.text) {
            admitted.insert(norm(&name.text));
        }
    }

    // Rule 3: typed-declaration heuristic (deliberately over-admitting).
    for pair in idents.windows(2) {
        let (t, n) = (pair[0], pair[1]);
        if is_stop(&n.text) {
            continue;
        }
        let t_norm = norm(&t.text);
        if RESERVED_MODIFIERS.contains(&t_norm.as_str()) {
            continue;
        }
        let t_is_type_like = is_stop(&t.text) || !t_norm.is_empty();
        if !t_is_type_like {
            continue;
        }
        if policy.exclude_single_letter_identifiers && n.text.chars().count() == 1 {
            continue;
        }
        admitted.insert(norm(&n.text));
    }

    // Rule 4: qualified identifiers (raw token stream, including punct).
    if policy.include_qualified_identifiers != QualifiedIdentifiers::None {
        for triple in tokens.windows(3) {
            let (a, p, b) = (&triple[0], &triple[1], &triple[2]);
            if a.kind != TokenKind::Identifier
                || p.kind != TokenKind::Punct
                || b.kind != TokenKind::Identifier
            {
                continue;
            }
            let admits = (p.text == "." && policy.include_qualified_identifiers.admits_dot())
                || (p.text == "::" && policy.include_qualified_identifiers.admits_scope());
            if !admits {
                continue;
            }
            if !is_stop(&a.text) {
                admitted.insert(norm(&a.text));
            }
            if !is_stop(&b.text) {
                admitted.insert(norm(&b.text));
            }
        }
    }

    // Rule 5: `#include <PATH>` / `#include "PATH"` header scanning.
    if policy.include_include_headers {
        for cap in include_directive_re().captures_iter(raw_text) {
            let path = cap.get(1).map(|m| m.as_str()).unwrap_or("");
            for m in id_re.find_iter(path) {
                admitted.insert(norm(m.as_str()));
            }
        }
    }

    trace!(profile = %profile.profile_id, admitted = admitted.len(), "discovery: pass complete");
    admitted
}
