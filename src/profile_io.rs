//! Loads [`LanguageProfile`] and [`Registry`] documents from disk.
//!
//! Profile and registry files are authored by hand, so they are parsed with
//! the `json5` crate (comments, trailing commas, unquoted keys) rather than
//! strict `serde_json` — the emitted index itself stays strict JSON via
//! [`crate::canonical`].

use std::collections::HashMap;
use std::path::Path;

use crate::errors::{ConfigError, Result};
use crate::model::{LanguageProfile, Registry};
use crate::registry::ProfileRegistry;

fn parse_json5<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    json5::from_str(text).map_err(|e| {
        ConfigError::InvalidProfile(format!("{}: {e}", path.display())).into()
    })
}

impl LanguageProfile {
    /// Loads and parses a single profile document.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        parse_json5(path, &text)
    }
}

fn load_registry_schema(path: &Path) -> Result<Registry> {
    let text = std::fs::read_to_string(path)?;
    parse_json5(path, &text)
}

impl ProfileRegistry {
    /// Loads a registry file and every profile it references (profile paths
    /// in `registry.profiles` are resolved relative to `base_dir`),
    /// producing a ready-to-route registry.
    pub fn load(registry_path: &Path, base_dir: &Path, registry_id: Option<String>) -> Result<Self> {
        let registry = load_registry_schema(registry_path)?;
        let mut profiles = HashMap::with_capacity(registry.profiles.len());
        for (alias, rel_path) in &registry.profiles {
            let profile = LanguageProfile::load(&base_dir.join(rel_path))?;
            profiles.insert(alias.clone(), profile);
        }
        ProfileRegistry::new(registry_id, &registry, profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn loads_profile_with_comments_and_trailing_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("java.json5");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{
  // a minimal Java-ish profile
  profile_id: "java",
  name: "Java",
  case_sensitivity: "sensitive",
  normalization: {{ mode: "none", preserve_original_spelling: true, }},
  identifier_rule: {{ mode: "regex", pattern: "[A-Za-z_][A-Za-z0-9_]*", }},
  stop_words: {{ mode: "none", }},
  comment_syntax: {{
    line_comment_starts: ["//",],
    block_comment_starts: ["/*",],
    block_comment_ends: ["*/",],
  }},
  literal_syntax: {{
    exclude_literals: true,
    string_delims: ["\"",],
    char_delims: ["'",],
    escape_char: "\\",
    allow_multiline_strings: false,
  }},
}}
"#
        )
        .unwrap();

        let profile = LanguageProfile::load(&path).unwrap();
        assert_eq!(profile.profile_id, "java");
        assert_eq!(profile.comment_syntax.line_comment_starts, vec!["//"]);
    }

    #[test]
    fn loads_registry_and_its_profiles() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("profiles")).unwrap();
        let profile_path = dir.path().join("profiles/java.json5");
        std::fs::write(
            &profile_path,
            r#"{
  profile_id: "java",
  name: "Java",
  case_sensitivity: "sensitive",
  normalization: { mode: "none", preserve_original_spelling: true },
  identifier_rule: { mode: "regex", pattern: "[A-Za-z_][A-Za-z0-9_]*" },
  stop_words: { mode: "none" },
  comment_syntax: { line_comment_starts: ["//"], block_comment_starts: ["/*"], block_comment_ends: ["*/"] },
  literal_syntax: { exclude_literals: true, string_delims: ["\""], char_delims: ["'"], escape_char: "\\", allow_multiline_strings: false },
}
"#,
        )
        .unwrap();

        let registry_path = dir.path().join("registry.json5");
        std::fs::write(
            &registry_path,
            r#"{
  profiles: { java: "profiles/java.json5" },
  rules: [ { match: { glob: "**/*.java" }, profile: "java" } ],
}
"#,
        )
        .unwrap();

        let reg = ProfileRegistry::load(&registry_path, dir.path(), None).unwrap();
        assert_eq!(reg.route("src/Hello.java"), Some("java"));
    }
}
