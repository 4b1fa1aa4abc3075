//! Profile registry: routes files to a [`LanguageProfile`] by glob pattern
//! and assembles a multi-profile [`ProjectIndex`]. See SPEC_FULL.md §4.4.
//!
//! Routing is first-match-wins over `rules` in file order, which is why
//! rules are matched one at a time with an individual [`globset::GlobMatcher`]
//! rather than folded into one [`globset::GlobSet`] — a `GlobSet` reports
//! *all* matches, and recovering "the first one in source order" from that
//! would mean carrying rule indices through anyway.

use std::collections::HashMap;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};

use crate::errors::{ConfigError, Result};
use crate::index::{index_files, FileInput};
use crate::model::{Diagnostic, LanguageProfile, ProjectIndex, Registry, Severity};
use crate::options::{effective_generated_at, IndexOptions};

struct CompiledRule {
    matcher: GlobMatcher,
    profile_alias: String,
}

/// A loaded registry: glob routing rules plus every profile they can resolve
/// to, keyed by the alias used in `rules[].profile` (not necessarily the
/// profile's own `profile_id`).
pub struct ProfileRegistry {
    registry_id: Option<String>,
    rules: Vec<CompiledRule>,
    profiles: HashMap<String, LanguageProfile>,
}

impl ProfileRegistry {
    /// Builds a registry from its parsed schema and the profiles it
    /// references. `profiles` must contain an entry for every alias used in
    /// `registry.rules` and `registry.profiles` (loading those from disk is
    /// [`crate::profile_io`]'s job, not this constructor's).
    pub fn new(
        registry_id: Option<String>,
        registry: &Registry,
        profiles: HashMap<String, LanguageProfile>,
    ) -> Result<Self> {
        let mut rules = Vec::with_capacity(registry.rules.len());
        for rule in &registry.rules {
            if !registry.profiles.contains_key(&rule.profile) {
                return Err(ConfigError::UnknownRegistryAlias(rule.profile.clone()).into());
            }
            // `*`/`?` must not cross `/` per spec.md §4.4's glob grammar —
            // globset leaves that off by default, so it's turned on explicitly.
            let matcher = GlobBuilder::new(&rule.matcher.glob)
                .literal_separator(true)
                .build()?
                .compile_matcher();
            rules.push(CompiledRule {
                matcher,
                profile_alias: rule.profile.clone(),
            });
        }
        Ok(Self {
            registry_id,
            rules,
            profiles,
        })
    }

    /// Returns the profile alias of the first rule whose glob matches
    /// `file_id`, in rule order.
    pub fn route(&self, file_id: &str) -> Option<&str> {
        let path = Path::new(file_id);
        self.rules
            .iter()
            .find(|r| r.matcher.is_match(path))
            .map(|r| r.profile_alias.as_str())
    }

    /// Resolves the [`LanguageProfile`] that `file_id` would be indexed
    /// under, or `None` if no rule matches.
    pub fn profile_for(&self, file_id: &str) -> Option<&LanguageProfile> {
        self.route(file_id).and_then(|alias| self.profiles.get(alias))
    }

    /// Groups `inputs` by matched profile, indexes each group, and assembles
    /// a [`ProjectIndex`] with `indexes` sorted by `profile_id` (spec.md §4.4:
    /// "deterministic regardless of directory walk order"). Files with no
    /// matching rule produce a `registry.no_rule` diagnostic and are
    /// otherwise skipped, rather than aborting the run.
    pub fn build_project_index(
        &self,
        inputs: Vec<FileInput>,
        opts: &IndexOptions,
        project_root: &str,
    ) -> Result<ProjectIndex> {
        debug!(file_count = inputs.len(), project_root, "registry: routing files to profiles");

        let mut by_alias: HashMap<&str, Vec<FileInput>> = HashMap::new();
        let mut diagnostics = Vec::new();

        for input in inputs {
            match self.route(&input.file_id) {
                Some(alias) => by_alias.entry(alias).or_default().push(input),
                None => {
                    warn!(file_id = %input.file_id, "registry: no rule matched this file");
                    diagnostics.push(Diagnostic {
                        severity: Severity::Warning,
                        file_id: input.file_id,
                        line: None,
                        col: None,
                        message: "no registry rule matched this file".to_string(),
                        code: "registry.no_rule",
                    })
                }
            }
        }

        let mut indexes = Vec::with_capacity(by_alias.len());
        for (alias, group) in by_alias {
            let profile = self
                .profiles
                .get(alias)
                .ok_or_else(|| ConfigError::UnknownRegistryAlias(alias.to_string()))?;
            debug!(profile = alias, file_count = group.len(), "registry: indexing group");
            indexes.push(index_files(&group, profile, opts)?);
        }
        indexes.sort_by(|a, b| a.profile_id.as_bytes().cmp(b.profile_id.as_bytes()));
        debug!(profile_count = indexes.len(), unmatched = diagnostics.len(), "registry: project index assembled");

        Ok(ProjectIndex {
            schema_version: crate::model::SCHEMA_VERSION.to_string(),
            project_root: project_root.to_string(),
            generated_at: effective_generated_at(opts),
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            registry_id: self.registry_id.clone(),
            project_sha256: None,
            indexes,
            artifacts: None,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RegistryMatch, RegistryRule};
    use crate::test_support::minimal_profile;
    use std::collections::BTreeMap;

    fn registry_with_rules(rules: Vec<(&str, &str)>) -> Registry {
        let mut profiles = BTreeMap::new();
        profiles.insert("java".to_string(), "profiles/java.json5".to_string());
        profiles.insert("python".to_string(), "profiles/python.json5".to_string());
        Registry {
            profiles,
            rules: rules
                .into_iter()
                .map(|(glob, profile)| RegistryRule {
                    matcher: RegistryMatch {
                        glob: glob.to_string(),
                    },
                    profile: profile.to_string(),
                })
                .collect(),
        }
    }

    fn loaded_profiles() -> HashMap<String, LanguageProfile> {
        let mut m = HashMap::new();
        m.insert("java".to_string(), minimal_profile(|p| p.profile_id = "java".to_string()));
        m.insert(
            "python".to_string(),
            minimal_profile(|p| p.profile_id = "python".to_string()),
        );
        m
    }

    #[test]
    fn first_matching_rule_wins() {
        let registry = registry_with_rules(vec![("**/*.java", "java"), ("**/*", "python")]);
        let reg = ProfileRegistry::new(None, &registry, loaded_profiles()).unwrap();
        assert_eq!(reg.route("src/Hello.java"), Some("java"));
        assert_eq!(reg.route("src/script.py"), Some("python"));
    }

    #[test]
    fn unmatched_file_resolves_to_none() {
        let registry = registry_with_rules(vec![("**/*.java", "java")]);
        let reg = ProfileRegistry::new(None, &registry, loaded_profiles()).unwrap();
        assert_eq!(reg.route("README.md"), None);
    }

    #[test]
    fn unknown_alias_in_rule_is_rejected_at_construction() {
        let registry = registry_with_rules(vec![("**/*.java", "not_registered")]);
        let err = ProfileRegistry::new(None, &registry, loaded_profiles());
        assert!(err.is_err());
    }

    #[test]
    fn project_index_groups_sorted_by_profile_id() {
        let registry = registry_with_rules(vec![("**/*.java", "java"), ("**/*.py", "python")]);
        let reg = ProfileRegistry::new(Some("demo-registry".to_string()), &registry, loaded_profiles()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let java_path = dir.path().join("Hello.java");
        std::fs::write(&java_path, "class Hello { int x; }\n").unwrap();
        let py_path = dir.path().join("script.py");
        std::fs::write(&py_path, "x = 1\n").unwrap();

        let inputs = vec![
            FileInput {
                path: py_path,
                file_id: "script.py".to_string(),
            },
            FileInput {
                path: java_path,
                file_id: "Hello.java".to_string(),
            },
        ];
        let project = reg
            .build_project_index(inputs, &IndexOptions::default(), "demo")
            .unwrap();
        let ids: Vec<&str> = project.indexes.iter().map(|i| i.profile_id.as_str()).collect();
        assert_eq!(ids, vec!["java", "python"]);
    }
}
