//! Named build artifacts exchanged between build steps.
//!
//! Upstream generators register their outputs (documentation trees, client
//! application bundles) under well-known ids; the assembly steps look them up
//! and export them into the webapp.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::archive;

/// Well-known id of the documentation artifact consumed by the build step.
pub const DOCS_ARTIFACT: &str = "docs";
/// Id under which the expanded webapp directory is registered.
pub const WEBAPP_DIR_ARTIFACT: &str = "webapp.dir";
/// Id under which the packaged archive is registered.
pub const WEBAPP_WAR_ARTIFACT: &str = "webapp.war";

/// A named build output: a file or a directory produced by some step.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Name of the step or module that produced the artifact.
    pub module: String,
    /// Registry id, e.g. `docs` or `webapp.war`.
    pub id: String,
    /// Location of the output on disk.
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(module: impl Into<String>, id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Artifact {
            module: module.into(),
            id: id.into(),
            path: path.into(),
        }
    }

    /// Export the artifact into `dest_dir`.
    ///
    /// Directory artifacts export their contents; file artifacts are copied in
    /// by name.
    pub fn export_to(&self, dest_dir: &Path) -> anyhow::Result<()> {
        if self.path.is_dir() {
            archive::copy_dir_contents(&self.path, dest_dir)
        } else {
            archive::copy_file_into(&self.path, dest_dir).map(|_| ())
        }
        .with_context(|| format!("Failed to export artifact '{}'", self.id))
    }
}

/// In-memory registry of artifacts for one build invocation.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRegistry {
    artifacts: Vec<Artifact>,
}

impl ArtifactRegistry {
    /// Register an artifact. A later registration under the same id shadows an
    /// earlier one.
    pub fn add(&mut self, artifact: Artifact) {
        tracing::debug!(id = %artifact.id, path = %artifact.path.display(), "registering artifact");
        self.artifacts.push(artifact);
    }

    /// Find the most recently registered artifact with the given id.
    pub fn find(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().rev().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_latest_wins() {
        let mut registry = ArtifactRegistry::default();
        registry.add(Artifact::new("docs", DOCS_ARTIFACT, "/tmp/a"));
        registry.add(Artifact::new("docs", DOCS_ARTIFACT, "/tmp/b"));
        assert_eq!(
            registry.find(DOCS_ARTIFACT).unwrap().path,
            PathBuf::from("/tmp/b")
        );
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn test_export_directory_artifact() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("index.html"), "<html/>").unwrap();
        let dest = tempfile::tempdir().unwrap();

        let artifact = Artifact::new("docs", DOCS_ARTIFACT, src.path());
        artifact.export_to(dest.path()).unwrap();
        assert!(dest.path().join("index.html").exists());
    }

    #[test]
    fn test_export_file_artifact() {
        let src = tempfile::tempdir().unwrap();
        let file = src.path().join("api.wsdl");
        fs::write(&file, "<definitions/>").unwrap();
        let dest = tempfile::tempdir().unwrap();

        Artifact::new("docs", "wsdl", &file).export_to(dest.path()).unwrap();
        assert!(dest.path().join("api.wsdl").exists());
    }
}
