//! Data model for language profiles and the emitted symbol index.
//!
//! Field order in each struct is the serialized field order (§4.5 requires
//! schema order, not insertion order); do not reorder fields casually.
//!
//! Conventions:
//! - Enum variants serialize `snake_case` and match spec wording exactly
//!   (`lowercase_ascii`, `dot_and_scope`, ...).
//! - Optional fields that spec.md marks "omitted when absent" use
//!   `#[serde(skip_serializing_if = "Option::is_none")]`.

use serde::{Deserialize, Serialize};

//
// ───────────────────────────────── Language profile ─────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    None,
    Nfkc,
    LowercaseAscii,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalization {
    pub mode: NormalizationMode,
    pub preserve_original_spelling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMode {
    Regex,
    UnicodeIdentifier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierRule {
    pub mode: IdentifierMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWordsMode {
    Inline,
    Uri,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopWordsRule {
    pub mode: StopWordsMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Line/block comment markers, 1-to-1 aligned between start and end lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentSyntax {
    #[serde(default)]
    pub line_comment_starts: Vec<String>,
    #[serde(default)]
    pub block_comment_starts: Vec<String>,
    #[serde(default)]
    pub block_comment_ends: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralSyntax {
    pub exclude_literals: bool,
    #[serde(default)]
    pub string_delims: Vec<char>,
    #[serde(default)]
    pub char_delims: Vec<char>,
    pub escape_char: char,
    pub allow_multiline_strings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPolicyMode {
    All,
    Declared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifiedIdentifiers {
    None,
    Dot,
    Scope,
    DotAndScope,
}

impl QualifiedIdentifiers {
    pub fn admits_dot(self) -> bool {
        matches!(self, Self::Dot | Self::DotAndScope)
    }

    pub fn admits_scope(self) -> bool {
        matches!(self, Self::Scope | Self::DotAndScope)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SymbolPolicy {
    pub mode: SymbolPolicyMode,
    pub exclude_single_letter_identifiers: bool,
    pub include_qualified_identifiers: QualifiedIdentifiers,
    pub include_include_headers: bool,
}

impl Default for SymbolPolicy {
    fn default() -> Self {
        Self {
            mode: SymbolPolicyMode::All,
            exclude_single_letter_identifiers: false,
            include_qualified_identifiers: QualifiedIdentifiers::None,
            include_include_headers: false,
        }
    }
}

/// Immutable, JSON-loaded lexical specification for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub profile_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub case_sensitivity: CaseSensitivity,
    pub normalization: Normalization,
    pub identifier_rule: IdentifierRule,
    pub stop_words: StopWordsRule,
    pub comment_syntax: CommentSyntax,
    pub literal_syntax: LiteralSyntax,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_policy: Option<SymbolPolicy>,
}

//
// ───────────────────────────────── Tokens & occurrences ─────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Punct,
    Other,
    Eof,
}

/// Ephemeral lexer output. Columns are 1-based, `col_end` exclusive; `byte_*`
/// are 0-based UTF-8 byte offsets; `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    pub file_id: String,
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_end: Option<usize>,
}

impl Occurrence {
    /// Sort key per spec.md §3: `(file_id, line, col_start, col_end)`.
    pub fn sort_key(&self) -> (&str, usize, usize, usize) {
        (&self.file_id, self.line, self.col_start, self.col_end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolStats {
    pub occurrence_count: usize,
    pub unique_line_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub identifier: String,
    pub occurrences: Vec<Occurrence>,
    pub stats: SymbolStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_id: String,
    pub lines: usize,
    pub bytes: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    pub message: String,
    pub code: &'static str,
}

/// Purely derived roll-up counters, recomputable from `files`/`symbols`.
/// Not part of spec.md's core schema; added so downstream consumers (rows
/// emitter, schema validation) don't have to recompute them. See
/// DESIGN.md.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_files: usize,
    pub total_symbols: usize,
    pub total_occurrences: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    Lex,
}

impl Default for Ordering {
    fn default() -> Self {
        Self::Lex
    }
}

pub const SCHEMA_VERSION: &str = "2.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolIndex {
    pub schema_version: String,
    pub profile_id: String,
    pub ordering: Ordering,
    pub generated_at: String,
    pub files: Vec<FileSummary>,
    pub symbols: Vec<SymbolEntry>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: IndexStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIndex {
    pub schema_version: String,
    pub project_root: String,
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_sha256: Option<String>,
    pub indexes: Vec<SymbolIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

//
// ───────────────────────────────── Registry schema ─────────────────────────────────
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMatch {
    pub glob: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRule {
    #[serde(rename = "match")]
    pub matcher: RegistryMatch,
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub profiles: std::collections::BTreeMap<String, String>,
    pub rules: Vec<RegistryRule>,
}
