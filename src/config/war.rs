use serde::Deserialize;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

/// Configuration for the assembly of the webapp archive.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WarConfig {
    /// File name of the packaged archive. Defaults to `<label>.war`.
    pub name: Option<String>,
    /// Directory inside the webapp for the exported documentation. Defaults
    /// to the webapp root.
    pub docs_dir: Option<String>,
    /// Directory inside the webapp for client application bundles. Defaults
    /// to the webapp root.
    pub client_app_dir: Option<String>,
    /// Transform template applied to `web.xml` before it is placed in
    /// `WEB-INF`. No transform is applied when unset.
    pub web_xml_transform: Option<PathBuf>,
    /// Directory or zip supplying a base for the webapp, applied *before* the
    /// assembly populates it.
    pub pre_base: Option<PathBuf>,
    /// Directory or zip supplying a base for the webapp, applied *after* the
    /// assembly populates it.
    pub post_base: Option<PathBuf>,
    /// Whether the build classpath seeds the lib include/exclude filter. When
    /// false only `include_libs` file entries are considered.
    #[serde(default = "default_true")]
    pub include_classpath_libs: bool,
    /// Whether the built-in table of known build-time-only archives applies.
    #[serde(default = "default_true")]
    pub exclude_default_libs: bool,
    /// Include rules applied to the candidate set.
    #[serde(default)]
    pub include_libs: Vec<LibRule>,
    /// Exclude rules applied to entries that survived the include filter.
    /// First matching rule wins, in declaration order.
    #[serde(default)]
    pub exclude_libs: Vec<LibRule>,
    /// Manifest attribute overrides.
    #[serde(default)]
    pub manifest: Vec<ManifestAttribute>,
}

/// A lib include or exclude rule: a glob-style path pattern (`*` within a
/// segment, `**` across segments) or an explicit file reference.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LibRule {
    /// Glob pattern matched against the normalized absolute path.
    pub pattern: Option<String>,
    /// Explicit file, matched by path equality for excludes and added
    /// unconditionally for includes.
    pub file: Option<PathBuf>,
    /// For exclude rules: record the excluded archive's file name in the
    /// manifest `Class-Path` even though it is not copied into the webapp.
    #[serde(default)]
    pub include_in_manifest: bool,
}

/// One manifest attribute; attributes without a section land in the main
/// section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestAttribute {
    pub name: String,
    pub value: String,
    pub section: Option<String>,
}
