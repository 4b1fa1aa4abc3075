//! Canonical JSON emission. See SPEC_FULL.md §4.5.
//!
//! Every on-disk/emitted document goes through [`to_canonical_json`] so there
//! is exactly one place that decides formatting. `serde_json`'s default
//! pretty formatter already does the two things spec.md requires: it walks
//! struct fields in declaration order (not some alphabetized order) and
//! leaves non-ASCII bytes unescaped, so no custom `Formatter` is needed —
//! only a single narrow entry point that both the CLI and the tests call
//! instead of `serde_json::to_string_pretty` directly, so the formatting
//! policy stays centralized even if it someday needs to change.

use serde::Serialize;

use crate::errors::Result;

/// Serializes `value` to its canonical, deterministic JSON representation:
/// two-space indentation, struct field order, trailing newline.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = serde_json::to_vec_pretty(value)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf).expect("serde_json output is always valid UTF-8"))
}
