mod common;

use std::path::PathBuf;

use common::fake_jar;
use warpack::classifier::{
    CandidatePath, Classifier, ExcludeReason, PRESERVE_MARKER,
};
use warpack::config::LibRule;

fn pattern_rule(pattern: &str) -> LibRule {
    LibRule {
        pattern: Some(pattern.to_string()),
        file: None,
        include_in_manifest: false,
    }
}

#[test]
fn preserve_marker_is_never_excluded() {
    let dir = tempfile::tempdir().unwrap();
    // The archive both trips a built-in signature and matches a user exclude
    // pattern; the marker still wins.
    let jar = fake_jar(
        dir.path(),
        "kept-tools.jar",
        &[PRESERVE_MARKER, "freemarker/template/Configuration.class"],
    );
    let classifier =
        Classifier::new(&[], &[pattern_rule("**/*-tools.jar")], true, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&jar)]);
    assert_eq!(result.bundle_files, vec![jar]);
    assert!(result.excluded.is_empty());
}

#[test]
fn first_matching_exclude_rule_determines_manifest_flag() {
    let dir = tempfile::tempdir().unwrap();
    let jar = fake_jar(dir.path(), "shared.jar", &["com/myco/Api.class"]);
    let flagged = LibRule {
        pattern: Some("**/shared.jar".to_string()),
        file: None,
        include_in_manifest: true,
    };
    let unflagged = LibRule {
        pattern: Some("**/*.jar".to_string()),
        file: None,
        include_in_manifest: false,
    };

    let classifier =
        Classifier::new(&[], &[flagged.clone(), unflagged.clone()], false, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&jar)]);
    assert_eq!(result.manifest_classpath, vec!["shared.jar".to_string()]);

    let classifier = Classifier::new(&[], &[unflagged, flagged], false, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&jar)]);
    assert!(result.manifest_classpath.is_empty());
    assert!(!result.excluded[0].include_in_manifest);
}

#[test]
fn empty_include_rules_keep_every_entry() {
    let dir = tempfile::tempdir().unwrap();
    let jars: Vec<CandidatePath> = (0..4)
        .map(|i| {
            CandidatePath::new(fake_jar(
                dir.path(),
                &format!("lib-{i}.jar"),
                &["com/myco/Api.class"],
            ))
        })
        .collect();
    let classifier = Classifier::new(&[], &[], false, true).unwrap();
    let result = classifier.classify(&jars);
    assert_eq!(result.bundle_files.len(), 4);
}

#[test]
fn tools_pattern_excludes_nested_candidate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("x/y")).unwrap();
    let jar = fake_jar(&dir.path().join("x/y"), "build-tools.jar", &["A.class"]);
    let classifier =
        Classifier::new(&[], &[pattern_rule("**/*-tools.jar")], false, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&jar)]);
    assert!(result.bundle_files.is_empty());
    assert_eq!(
        result.excluded[0].reason,
        ExcludeReason::Pattern("**/*-tools.jar".to_string())
    );
}

#[test]
fn builtin_signature_excludes_compiler_tooling_without_user_rules() {
    let dir = tempfile::tempdir().unwrap();
    let tools = fake_jar(dir.path(), "tools.jar", &["com/sun/tools/apt/Main.class"]);
    let api = fake_jar(dir.path(), "api.jar", &["com/myco/Api.class"]);
    let classifier = Classifier::new(&[], &[], true, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&tools), CandidatePath::new(&api)]);
    assert_eq!(result.bundle_files, vec![api]);
    assert_eq!(
        result.excluded[0].reason,
        ExcludeReason::Signature("compiler tooling (tools.jar)")
    );
    // Signature exclusions never reach the manifest classpath.
    assert!(result.manifest_classpath.is_empty());
}

#[test]
fn builtin_signatures_disabled_bundle_compiler_tooling() {
    let dir = tempfile::tempdir().unwrap();
    let tools = fake_jar(dir.path(), "tools.jar", &["com/sun/tools/apt/Main.class"]);
    let classifier = Classifier::new(&[], &[], false, true).unwrap();
    let result = classifier.classify(&[CandidatePath::new(&tools)]);
    assert_eq!(result.bundle_files, vec![tools]);
}

#[test]
fn classification_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let tools = fake_jar(dir.path(), "tools.jar", &["com/sun/tools/apt/Main.class"]);
    let api = fake_jar(dir.path(), "api.jar", &["com/myco/Api.class"]);
    let kept = fake_jar(dir.path(), "kept.jar", &[PRESERVE_MARKER]);
    let candidates = vec![
        CandidatePath::new(&tools),
        CandidatePath::new(&api),
        CandidatePath::new(&kept),
    ];
    let classifier = Classifier::new(
        &[pattern_rule("**/*.jar")],
        &[pattern_rule("**/tools.jar")],
        true,
        true,
    )
    .unwrap();
    let first = classifier.classify(&candidates);
    let second = classifier.classify(&candidates);
    assert_eq!(first, second);
}

#[test]
fn directories_on_the_classpath_bundle_as_classes() {
    let dir = tempfile::tempdir().unwrap();
    let classes = dir.path().join("classes");
    std::fs::create_dir_all(&classes).unwrap();
    let jar = fake_jar(dir.path(), "api.jar", &["com/myco/Api.class"]);
    let classifier = Classifier::new(&[], &[], true, true).unwrap();
    let result = classifier.classify(&[
        CandidatePath::new(&classes),
        CandidatePath::new(&jar),
    ]);
    assert_eq!(result.bundle_dirs, vec![classes]);
    assert_eq!(result.bundle_files, vec![jar]);
}

#[test]
fn explicit_include_file_survives_every_filter() {
    let dir = tempfile::tempdir().unwrap();
    let pinned = fake_jar(dir.path(), "pinned.jar", &["com/myco/Api.class"]);
    let include = LibRule {
        pattern: None,
        file: Some(pinned.clone()),
        include_in_manifest: false,
    };
    // Includes that would never match the pattern filter, plus an exclude
    // matching everything: the explicit file still ships.
    let classifier = Classifier::new(
        &[include, pattern_rule("**/nothing-*.jar")],
        &[pattern_rule("**/*.jar")],
        false,
        true,
    )
    .unwrap();
    let result = classifier.classify(&[CandidatePath::new(&pinned)]);
    assert_eq!(result.bundle_files, vec![PathBuf::from(&pinned)]);
}
