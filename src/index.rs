//! The indexing engine: per-file read/hash/lex/filter, multi-file
//! aggregation, sorting, stats, and [`SymbolIndex`] assembly. See
//! SPEC_FULL.md §4.3.
//!
//! Determinism: inputs are sorted by `file_id` before any per-file work
//! happens, so "first seen" bookkeeping (for `preserve_original_spelling`)
//! and the final `occ_map` are independent of the order `inputs` was
//! supplied in. The occurrence map itself is a plain `HashMap` during
//! accumulation — only the final sorted `Vec`s leave this function, so
//! iteration-order nondeterminism never reaches the output (spec.md §9,
//! "Determinism under parallelism").

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, error, trace, warn};

use crate::discovery::discover_declarations;
use crate::errors::Result;
use crate::lexer::Lexer;
use crate::model::{
    Diagnostic, FileSummary, IndexStats, LanguageProfile, Occurrence, Severity, SymbolEntry,
    SymbolIndex, SymbolPolicyMode, SymbolStats, TokenKind, SCHEMA_VERSION,
};
use crate::normalize::{display_identifier, normalize_key};
use crate::options::{effective_generated_at, effective_policy, IndexOptions};
use crate::stopwords::build_stop_words;

/// One input file to index: its path on disk and the `file_id` it should be
/// reported under.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub path: PathBuf,
    pub file_id: String,
}

/// Computes `file_id` per spec.md's GLOSSARY: root-relative with `/`
/// separators when `root` is given, else the basename.
pub fn file_id_for(path: &Path, root: Option<&Path>) -> String {
    match root {
        Some(root) => match pathdiff::diff_paths(path, root) {
            Some(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            None => path.to_string_lossy().into_owned(),
        },
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

struct FileRecord {
    file_id: String,
    text: String,
    summary: FileSummary,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn read_file(input: &FileInput, diagnostics: &mut Vec<Diagnostic>) -> Option<FileRecord> {
    let bytes = match std::fs::read(&input.path) {
        Ok(b) => b,
        Err(e) => {
            error!(file_id = %input.file_id, path = %input.path.display(), error = %e, "failed to read file");
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                file_id: input.file_id.clone(),
                line: None,
                col: None,
                message: format!("failed to read file: {e}"),
                code: "io.read",
            });
            return None;
        }
    };

    let sha256 = sha256_hex(&bytes);
    let text = match String::from_utf8(bytes.clone()) {
        Ok(t) => t,
        Err(e) => {
            warn!(file_id = %input.file_id, error = %e, "invalid UTF-8; decoded with replacement characters");
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                file_id: input.file_id.clone(),
                line: None,
                col: None,
                message: "invalid UTF-8; decoded with replacement characters".to_string(),
                code: "text.encoding",
            });
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };

    let lines = if text.is_empty() {
        0
    } else {
        1 + text.matches('\n').count()
    };

    Some(FileRecord {
        file_id: input.file_id.clone(),
        summary: FileSummary {
            file_id: input.file_id.clone(),
            lines,
            bytes: bytes.len(),
            sha256,
        },
        text,
    })
}

/// Indexes `inputs` (which must all share `profile`) into one [`SymbolIndex`].
///
/// Fails only on configuration problems (malformed profile / uncompilable
/// regex — via [`Lexer::new`]); per-file I/O and encoding problems are
/// recorded as diagnostics and do not abort the run.
pub fn index_files(
    inputs: &[FileInput],
    profile: &LanguageProfile,
    opts: &IndexOptions,
) -> Result<SymbolIndex> {
    debug!(profile = %profile.profile_id, input_count = inputs.len(), "index: starting run");
    let lexer = Lexer::new(profile)?;
    let stop = build_stop_words(profile);
    let policy = effective_policy(profile, opts);

    let mut diagnostics = Vec::new();
    let mut records: Vec<FileRecord> = inputs
        .iter()
        .filter_map(|input| read_file(input, &mut diagnostics))
        .collect();
    // Sort before any per-file work so output is independent of input order.
    records.sort_by(|a, b| a.file_id.as_bytes().cmp(b.file_id.as_bytes()));
    debug!(
        read_ok = records.len(),
        read_failed = inputs.len() - records.len(),
        "index: files read"
    );

    let lexed: Vec<(&FileRecord, Vec<crate::model::Token>)> = records
        .iter()
        .map(|rec| {
            let tokens = lexer.lex(&rec.text);
            trace!(file_id = %rec.file_id, token_count = tokens.len(), "index: lexed file");
            (rec, tokens)
        })
        .collect();

    // Declaration discovery always runs: `allowed` is consulted both for
    // declared-only filtering and for the single-letter bypass rule, which
    // applies regardless of `symbol_policy.mode` (spec.md §4.3 step 4).
    let mut allowed: HashSet<String> = HashSet::new();
    for (rec, tokens) in &lexed {
        let local = discover_declarations(
            tokens,
            &rec.text,
            &stop,
            profile,
            &policy,
            lexer.identifier_regex(),
        );
        trace!(file_id = %rec.file_id, admitted = local.len(), "index: discovered declarations");
        allowed.extend(local);
    }
    debug!(admitted_total = allowed.len(), "index: declaration discovery complete");

    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut occ_map: HashMap<String, Vec<Occurrence>> = HashMap::new();

    for (rec, tokens) in &lexed {
        for tok in tokens.iter().filter(|t| t.kind == TokenKind::Identifier) {
            let key = normalize_key(&tok.text, profile);
            if stop.contains(&key) {
                continue;
            }
            if policy.mode == SymbolPolicyMode::Declared && !allowed.contains(&key) {
                continue;
            }
            if policy.exclude_single_letter_identifiers
                && tok.text.chars().count() == 1
                && !allowed.contains(&key)
            {
                continue;
            }
            first_seen
                .entry(key.clone())
                .or_insert_with(|| tok.text.clone());
            occ_map.entry(key).or_default().push(Occurrence {
                file_id: rec.file_id.clone(),
                line: tok.line,
                col_start: tok.col_start,
                col_end: tok.col_end,
                byte_start: Some(tok.byte_start),
                byte_end: Some(tok.byte_end),
            });
        }
    }

    let mut symbols: Vec<SymbolEntry> = occ_map
        .into_iter()
        .map(|(key, mut occurrences)| {
            occurrences.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
            let occurrence_count = occurrences.len();
            let unique_line_count = occurrences
                .iter()
                .map(|o| (o.file_id.clone(), o.line))
                .collect::<HashSet<_>>()
                .len();
            let raw = first_seen.get(&key).map(|s| s.as_str()).unwrap_or(&key);
            SymbolEntry {
                identifier: display_identifier(raw, &key, profile),
                occurrences,
                stats: SymbolStats {
                    occurrence_count,
                    unique_line_count,
                },
            }
        })
        .collect();
    symbols.sort_by(|a, b| a.identifier.as_bytes().cmp(b.identifier.as_bytes()));

    let mut files: Vec<FileSummary> = records.into_iter().map(|r| r.summary).collect();
    files.sort_by(|a, b| a.file_id.as_bytes().cmp(b.file_id.as_bytes()));

    let stats = IndexStats {
        total_files: files.len(),
        total_symbols: symbols.len(),
        total_occurrences: symbols.iter().map(|s| s.stats.occurrence_count).sum(),
    };
    debug!(
        profile = %profile.profile_id,
        files = stats.total_files,
        symbols = stats.total_symbols,
        occurrences = stats.total_occurrences,
        "index: run complete"
    );

    Ok(SymbolIndex {
        schema_version: SCHEMA_VERSION.to_string(),
        profile_id: profile.profile_id.clone(),
        ordering: opts.ordering,
        generated_at: effective_generated_at(opts),
        files,
        symbols,
        diagnostics,
        stats,
    })
}
