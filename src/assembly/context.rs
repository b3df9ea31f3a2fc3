use std::path::{Path, PathBuf};

use crate::artifacts::ArtifactRegistry;

/// A set of sources compiled into the webapp's classes.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Name used in log and error messages, e.g. `api` or `ws-client`.
    pub name: String,
    /// Root of the source tree.
    pub dir: PathBuf,
    /// Prebuilt classes an upstream generator produced for this set; merged
    /// into the compile output before compilation. A configured-but-missing
    /// directory is a fatal build error.
    pub companion_classes: Option<PathBuf>,
}

/// Per-invocation state shared by the assembly steps.
#[derive(Debug, Default)]
pub struct AssemblyContext {
    /// Scratch directory holding the step outputs.
    pub work_dir: PathBuf,
    /// Base for resolving relative configuration paths (normally the config
    /// file's directory).
    pub base_dir: PathBuf,
    /// The build classpath, in order.
    pub classpath: Vec<PathBuf>,
    /// Source sets for the compile step.
    pub source_sets: Vec<SourceSet>,
    /// Client application bundles copied into the webapp.
    pub client_app_dirs: Vec<PathBuf>,
    /// Artifacts exchanged with upstream steps.
    pub registry: ArtifactRegistry,
}

impl AssemblyContext {
    pub fn new(work_dir: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        AssemblyContext {
            work_dir: work_dir.into(),
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    /// Where the generate step writes the descriptors.
    pub fn generate_dir(&self) -> PathBuf {
        self.work_dir.join("generate").join("config")
    }

    /// Where the compile step writes classes and resources.
    pub fn compile_dir(&self) -> PathBuf {
        self.work_dir.join("compile")
    }

    /// The expanded webapp directory assembled by the build step.
    pub fn build_dir(&self) -> PathBuf {
        self.work_dir.join("build")
    }

    /// Where the package step writes the final archive.
    pub fn package_dir(&self) -> PathBuf {
        self.work_dir.join("package")
    }

    /// Resolve a possibly-relative configured path against the base dir.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The classpath as a platform separator-delimited string.
    pub fn classpath_string(&self, extra: &[PathBuf]) -> String {
        let joined = std::env::join_paths(self.classpath.iter().chain(extra.iter()))
            .unwrap_or_default();
        joined.to_string_lossy().into_owned()
    }

    /// Parse a separator-delimited classpath string into the context.
    pub fn set_classpath_from_str(&mut self, classpath: &str) {
        self.classpath = std::env::split_paths(classpath).collect();
    }
}
