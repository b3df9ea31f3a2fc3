use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

/// Compile a glob-style lib pattern, or `None` (with a warning) when the
/// pattern is not usable.
///
/// A usable pattern contains at least one wildcard; a literal string is a
/// file reference, not a pattern, and silently treating it as one hides
/// configuration mistakes. Compilation failures are also non-fatal: the rule
/// is skipped.
pub fn compile_pattern(pattern: &str) -> Option<GlobMatcher> {
    if !is_pattern(pattern) {
        warn!(pattern, "'{pattern}' is not a valid pattern, so it will not be applied");
        return None;
    }
    let normalized = pattern.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');
    match GlobBuilder::new(normalized).literal_separator(true).build() {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            warn!(pattern, %err, "'{pattern}' is not a valid pattern, so it will not be applied");
            None
        }
    }
}

/// Whether the string is a wildcard pattern at all (contains `*` or `?`).
pub fn is_pattern(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

/// Normalize an absolute path for pattern matching: `/` separators, with a
/// single leading separator stripped so `**/...` patterns match from the
/// root.
pub fn normalize_for_match(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    match s.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("**/*.jar"));
        assert!(is_pattern("lib-?.jar"));
        assert!(!is_pattern("/opt/libs/api.jar"));
    }

    #[test]
    fn test_literal_string_is_not_a_pattern() {
        assert!(compile_pattern("/opt/libs/api.jar").is_none());
    }

    #[test]
    fn test_normalize_strips_single_leading_separator() {
        assert_eq!(
            normalize_for_match(&PathBuf::from("/x/y/build-tools.jar")),
            "x/y/build-tools.jar"
        );
        assert_eq!(normalize_for_match(&PathBuf::from("rel/a.jar")), "rel/a.jar");
    }

    #[test]
    fn test_segment_wildcard_stays_in_segment() {
        let m = compile_pattern("opt/*.jar").unwrap();
        assert!(m.is_match("opt/api.jar"));
        assert!(!m.is_match("opt/nested/api.jar"));
    }

    #[test]
    fn test_recursive_wildcard_spans_segments() {
        let m = compile_pattern("**/*-tools.jar").unwrap();
        assert!(m.is_match("x/y/build-tools.jar"));
        assert!(m.is_match("build-tools.jar"));
        assert!(!m.is_match("x/y/build-tools.jar.txt"));
    }

    #[test]
    fn test_pattern_leading_separator_stripped() {
        let m = compile_pattern("/opt/**/*.jar").unwrap();
        assert!(m.is_match(normalize_for_match(&PathBuf::from("/opt/a/b/c.jar"))));
    }
}
