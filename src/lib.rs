//! Deterministic, schema-validated symbol indexing over profile-described
//! languages.
//!
//! This crate is a library only: walking a filesystem tree, parsing CLI
//! arguments, emitting a flattened rows format, and validating output
//! against a JSON Schema are left to an external collaborator. What lives
//! here is the lexer, the declaration-discovery heuristic, the indexing
//! engine, the profile registry, and canonical JSON emission — the pieces
//! whose behavior actually needs to be pinned down and tested.

pub mod canonical;
pub mod discovery;
pub mod errors;
pub mod index;
pub mod lexer;
pub mod model;
pub mod normalize;
pub mod options;
pub mod profile_io;
pub mod registry;
pub mod stopwords;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use canonical::to_canonical_json;
pub use discovery::discover_declarations;
pub use errors::{ConfigError, Error, Result};
pub use index::{file_id_for, index_files, FileInput};
pub use lexer::Lexer;
pub use model::{
    CaseSensitivity, CommentSyntax, Diagnostic, FileSummary, IdentifierMode, IdentifierRule,
    IndexStats, LanguageProfile, LiteralSyntax, Normalization, NormalizationMode, Ordering,
    ProjectIndex, QualifiedIdentifiers, Registry, RegistryMatch, RegistryRule, Severity,
    StopWordsMode, StopWordsRule, SymbolEntry, SymbolIndex, SymbolPolicy, SymbolPolicyMode,
    SCHEMA_VERSION,
};
pub use options::IndexOptions;
pub use registry::ProfileRegistry;
