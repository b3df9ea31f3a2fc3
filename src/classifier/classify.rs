use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::bail;
use globset::GlobMatcher;
use tracing::debug;

use crate::config::{LibRule, WarConfig};

use super::matcher::{compile_pattern, normalize_for_match};
use super::signatures::probe_archive;

/// A classpath entry considered for bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    /// Absolute path of the file or directory.
    pub path: PathBuf,
    /// Directories are bundled into `WEB-INF/classes` rather than
    /// `WEB-INF/lib`, and never contribute to the manifest classpath.
    pub is_dir: bool,
}

impl CandidatePath {
    /// Build a candidate, deriving the directory flag from the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_dir = path.is_dir();
        CandidatePath { path, is_dir }
    }
}

/// Why an entry was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeReason {
    /// Matched a built-in signature; carries the signature's reason text.
    Signature(&'static str),
    /// Matched an exclude rule's explicit file reference.
    ExplicitFile,
    /// Matched an exclude rule's pattern.
    Pattern(String),
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludeReason::Signature(reason) => write!(f, "{reason}"),
            ExcludeReason::ExplicitFile => write!(f, "explicitly excluded"),
            ExcludeReason::Pattern(pattern) => write!(f, "matches pattern '{pattern}'"),
        }
    }
}

/// One excluded entry with its reason and manifest disposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedEntry {
    pub path: PathBuf,
    pub reason: ExcludeReason,
    pub include_in_manifest: bool,
}

/// The classifier's verdict over one candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Archives to copy into the webapp's lib directory, in encounter order.
    pub bundle_files: Vec<PathBuf>,
    /// Directories whose contents merge into the webapp's classes directory.
    pub bundle_dirs: Vec<PathBuf>,
    /// Entries left out of the webapp.
    pub excluded: Vec<ExcludedEntry>,
    /// File names of excluded-but-referenced archives, in encounter order.
    pub manifest_classpath: Vec<String>,
}

struct CompiledExclude {
    file: Option<PathBuf>,
    pattern: Option<(String, GlobMatcher)>,
    include_in_manifest: bool,
}

/// Compiled include/exclude rules, ready to partition a candidate set.
pub struct Classifier {
    include_patterns: Vec<GlobMatcher>,
    explicit_includes: Vec<PathBuf>,
    excludes: Vec<CompiledExclude>,
    use_builtin_signatures: bool,
    use_classpath_as_seed: bool,
}

impl Classifier {
    /// Compile the classifier from a war configuration (or the defaults when
    /// none is configured: seed from the classpath, built-in signatures on,
    /// no user rules).
    pub fn from_war_config(war: Option<&WarConfig>) -> anyhow::Result<Self> {
        match war {
            Some(war) => Classifier::new(
                &war.include_libs,
                &war.exclude_libs,
                war.exclude_default_libs,
                war.include_classpath_libs,
            ),
            None => Classifier::new(&[], &[], true, true),
        }
    }

    /// Compile include and exclude rules.
    ///
    /// A rule with neither a pattern nor a file is a fatal configuration
    /// error; a rule whose pattern does not compile is skipped with a
    /// warning.
    pub fn new(
        include_rules: &[LibRule],
        exclude_rules: &[LibRule],
        use_builtin_signatures: bool,
        use_classpath_as_seed: bool,
    ) -> anyhow::Result<Self> {
        let mut include_patterns = Vec::new();
        let mut explicit_includes = Vec::new();
        for rule in include_rules {
            validate_rule(rule, "include")?;
            if let Some(file) = &rule.file {
                explicit_includes.push(file.clone());
            }
            if let Some(pattern) = &rule.pattern {
                if let Some(matcher) = compile_pattern(pattern) {
                    include_patterns.push(matcher);
                }
            }
        }

        let mut excludes = Vec::new();
        for rule in exclude_rules {
            validate_rule(rule, "exclude")?;
            let pattern = rule
                .pattern
                .as_ref()
                .and_then(|p| compile_pattern(p).map(|m| (p.clone(), m)));
            if rule.file.is_none() && pattern.is_none() {
                // Only an unusable pattern remains; the warning was emitted
                // during compilation.
                continue;
            }
            excludes.push(CompiledExclude {
                file: rule.file.clone(),
                pattern,
                include_in_manifest: rule.include_in_manifest,
            });
        }

        Ok(Classifier {
            include_patterns,
            explicit_includes,
            excludes,
            use_builtin_signatures,
            use_classpath_as_seed,
        })
    }

    /// Whether the build classpath seeds the candidate set.
    pub fn use_classpath_as_seed(&self) -> bool {
        self.use_classpath_as_seed
    }

    /// Partition the candidate set.
    ///
    /// The include filter runs strictly before the exclude filter; excludes
    /// only ever remove entries. Explicit include files are appended last and
    /// bypass every exclude. The result is deterministic for identical
    /// inputs: encounter order is preserved throughout.
    pub fn classify(&self, classpath: &[CandidatePath]) -> Classification {
        let mut result = Classification::default();

        let seed: &[CandidatePath] = if self.use_classpath_as_seed {
            classpath
        } else {
            &[]
        };

        // Include filter. With no pattern rules the implicit "**/*" matches
        // everything.
        let survivors: Vec<&CandidatePath> = if self.include_patterns.is_empty() {
            debug!("no include patterns specified, using the implicit '**/*' pattern");
            seed.iter().collect()
        } else {
            seed.iter()
                .filter(|cand| {
                    let normalized = normalize_for_match(&cand.path);
                    self.include_patterns.iter().any(|m| m.is_match(&normalized))
                })
                .collect()
        };

        // Exclude filter. Probing is only worthwhile when something could
        // exclude the entry.
        let needs_probe = self.use_builtin_signatures || !self.excludes.is_empty();
        for cand in survivors {
            let probe = if !cand.is_dir && needs_probe {
                probe_archive(&cand.path)
            } else {
                Default::default()
            };

            if probe.preserved {
                debug!(path = %cand.path.display(), "preserve marker present, bundling");
                self.bundle(&mut result, cand);
                continue;
            }

            if self.use_builtin_signatures {
                if let Some(sig) = probe.signature {
                    debug!(path = %cand.path.display(), reason = sig.reason, "excluded by signature");
                    result.excluded.push(ExcludedEntry {
                        path: cand.path.clone(),
                        reason: ExcludeReason::Signature(sig.reason),
                        include_in_manifest: false,
                    });
                    continue;
                }
            }

            match self.first_matching_exclude(&cand.path) {
                Some((rule, reason)) => {
                    debug!(path = %cand.path.display(), ?reason, "excluded by rule");
                    if rule.include_in_manifest && !cand.is_dir {
                        if let Some(name) = cand.path.file_name() {
                            result
                                .manifest_classpath
                                .push(name.to_string_lossy().into_owned());
                        }
                    }
                    result.excluded.push(ExcludedEntry {
                        path: cand.path.clone(),
                        reason,
                        include_in_manifest: rule.include_in_manifest,
                    });
                }
                None => self.bundle(&mut result, cand),
            }
        }

        // Explicit include files bypass the filters entirely.
        for file in &self.explicit_includes {
            let cand = CandidatePath::new(file.clone());
            self.bundle(&mut result, &cand);
        }

        result
    }

    fn bundle(&self, result: &mut Classification, cand: &CandidatePath) {
        if cand.is_dir {
            result.bundle_dirs.push(cand.path.clone());
        } else {
            result.bundle_files.push(cand.path.clone());
        }
    }

    fn first_matching_exclude(&self, path: &Path) -> Option<(&CompiledExclude, ExcludeReason)> {
        let normalized = normalize_for_match(path);
        for rule in &self.excludes {
            if let Some(file) = &rule.file {
                if file == path {
                    return Some((rule, ExcludeReason::ExplicitFile));
                }
            }
            if let Some((pattern, matcher)) = &rule.pattern {
                if matcher.is_match(&normalized) {
                    return Some((rule, ExcludeReason::Pattern(pattern.clone())));
                }
            }
        }
        None
    }
}

fn validate_rule(rule: &LibRule, kind: &str) -> anyhow::Result<()> {
    if rule.pattern.is_none() && rule.file.is_none() {
        bail!("A lib {kind} rule must specify either a pattern or a file.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str) -> LibRule {
        LibRule {
            pattern: Some(pattern.to_string()),
            file: None,
            include_in_manifest: false,
        }
    }

    fn candidates(paths: &[&str]) -> Vec<CandidatePath> {
        paths
            .iter()
            .map(|p| CandidatePath {
                path: PathBuf::from(p),
                is_dir: false,
            })
            .collect()
    }

    #[test]
    fn test_empty_rules_bundle_everything() {
        let classifier = Classifier::new(&[], &[], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/a/one.jar", "/b/two.jar"]));
        assert_eq!(result.bundle_files.len(), 2);
        assert!(result.excluded.is_empty());
    }

    #[test]
    fn test_include_pattern_filters_seed() {
        let classifier =
            Classifier::new(&[rule("**/api-*.jar")], &[], false, true).unwrap();
        let result =
            classifier.classify(&candidates(&["/libs/api-core.jar", "/libs/other.jar"]));
        assert_eq!(result.bundle_files, vec![PathBuf::from("/libs/api-core.jar")]);
    }

    #[test]
    fn test_exclude_pattern_matches_absolute_path() {
        let classifier =
            Classifier::new(&[], &[rule("**/*-tools.jar")], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/x/y/build-tools.jar", "/x/api.jar"]));
        assert_eq!(result.bundle_files, vec![PathBuf::from("/x/api.jar")]);
        assert_eq!(result.excluded.len(), 1);
        assert_eq!(
            result.excluded[0].reason,
            ExcludeReason::Pattern("**/*-tools.jar".to_string())
        );
    }

    #[test]
    fn test_explicit_file_exclude_by_equality() {
        let exclude = LibRule {
            pattern: None,
            file: Some(PathBuf::from("/libs/shared.jar")),
            include_in_manifest: true,
        };
        let classifier = Classifier::new(&[], &[exclude], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/libs/shared.jar", "/libs/kept.jar"]));
        assert_eq!(result.excluded[0].reason, ExcludeReason::ExplicitFile);
        assert_eq!(result.manifest_classpath, vec!["shared.jar".to_string()]);
        assert_eq!(result.bundle_files, vec![PathBuf::from("/libs/kept.jar")]);
    }

    #[test]
    fn test_first_matching_exclude_rule_wins() {
        let first = LibRule {
            pattern: Some("**/dup.jar".to_string()),
            file: None,
            include_in_manifest: true,
        };
        let second = LibRule {
            pattern: Some("**/*.jar".to_string()),
            file: None,
            include_in_manifest: false,
        };
        let classifier =
            Classifier::new(&[], &[first.clone(), second.clone()], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/libs/dup.jar"]));
        assert!(result.excluded[0].include_in_manifest);
        assert_eq!(result.manifest_classpath, vec!["dup.jar".to_string()]);

        // Reversed declaration order flips the manifest outcome.
        let classifier = Classifier::new(&[], &[second, first], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/libs/dup.jar"]));
        assert!(!result.excluded[0].include_in_manifest);
        assert!(result.manifest_classpath.is_empty());
    }

    #[test]
    fn test_directories_bundle_separately_and_skip_manifest() {
        let exclude = LibRule {
            pattern: Some("**/excluded-classes".to_string()),
            file: None,
            include_in_manifest: true,
        };
        let classifier = Classifier::new(&[], &[exclude], false, true).unwrap();
        let cands = vec![
            CandidatePath {
                path: PathBuf::from("/build/classes"),
                is_dir: true,
            },
            CandidatePath {
                path: PathBuf::from("/build/excluded-classes"),
                is_dir: true,
            },
        ];
        let result = classifier.classify(&cands);
        assert_eq!(result.bundle_dirs, vec![PathBuf::from("/build/classes")]);
        // Excluded directory never reaches the manifest classpath.
        assert!(result.manifest_classpath.is_empty());
        assert_eq!(result.excluded.len(), 1);
    }

    #[test]
    fn test_classpath_seed_disabled() {
        let include = LibRule {
            pattern: None,
            file: Some(PathBuf::from("/libs/only.jar")),
            include_in_manifest: false,
        };
        let classifier = Classifier::new(&[include], &[], false, false).unwrap();
        let result = classifier.classify(&candidates(&["/libs/ignored.jar"]));
        assert_eq!(result.bundle_files, vec![PathBuf::from("/libs/only.jar")]);
    }

    #[test]
    fn test_explicit_include_bypasses_excludes() {
        let include = LibRule {
            pattern: None,
            file: Some(PathBuf::from("/libs/pinned.jar")),
            include_in_manifest: false,
        };
        let exclude = rule("**/*.jar");
        let classifier = Classifier::new(&[include], &[exclude], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/libs/dropped.jar"]));
        assert_eq!(result.bundle_files, vec![PathBuf::from("/libs/pinned.jar")]);
        assert_eq!(result.excluded.len(), 1);
    }

    #[test]
    fn test_rule_without_pattern_or_file_is_fatal() {
        let empty = LibRule::default();
        assert!(Classifier::new(&[], &[empty], false, true).is_err());
    }

    #[test]
    fn test_invalid_pattern_rule_is_skipped() {
        // A literal string is not a pattern; the rule becomes a no-op.
        let not_a_pattern = rule("/libs/literal.jar");
        let classifier = Classifier::new(&[], &[not_a_pattern], false, true).unwrap();
        let result = classifier.classify(&candidates(&["/libs/literal.jar"]));
        assert_eq!(result.bundle_files.len(), 1);
        assert!(result.excluded.is_empty());
    }

    #[test]
    fn test_determinism() {
        let classifier = Classifier::new(
            &[rule("**/*.jar")],
            &[rule("**/*-tools.jar")],
            false,
            true,
        )
        .unwrap();
        let cands = candidates(&["/a/build-tools.jar", "/a/api.jar", "/b/other.jar"]);
        let first = classifier.classify(&cands);
        let second = classifier.classify(&cands);
        assert_eq!(first, second);
    }
}
