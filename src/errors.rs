//! Error taxonomy.
//!
//! [`ConfigError`] covers everything that must fail before any file is
//! touched (malformed profile, uncompilable regex, unknown registry alias).
//! An external CLI collaborator is expected to map this to exit code 2.
//! [`Error`] is the general-purpose error type returned by fallible core
//! operations; it wraps [`ConfigError`] alongside runtime causes. Per-file
//! failures during indexing are *not* routed through this type — they are
//! reported as [`crate::model::Diagnostic`]s and the run continues, per the
//! recoverable/fatal split in SPEC_FULL.md §7.

use thiserror::Error;

/// Fatal configuration errors, detected at profile/registry load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("uncompilable identifier regex: {0}")]
    UncompilableIdentifierRegex(#[source] regex::Error),

    #[error("unknown identifier_rule.mode: {0}")]
    UnknownIdentifierMode(String),

    #[error("unknown registry profile alias: {0}")]
    UnknownRegistryAlias(String),

    #[error("missing required input: {0}")]
    MissingRequiredInput(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("glob error: {0}")]
    Glob(#[from] globset::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
