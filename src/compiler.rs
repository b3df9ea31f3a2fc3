//! Delegation seam for the compile step.
//!
//! The assembly never compiles anything itself: it collects source sets and
//! hands them to a [`CompilerInvoker`]. The default implementation shells out
//! to an external compiler command.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::archive;
use crate::classifier::{compile_pattern, normalize_for_match};
use crate::config::CopyResources;

/// Invokes a compiler over a source set.
pub trait CompilerInvoker {
    /// Compile `sources` against `classpath` into `out_dir`, with any extra
    /// compiler arguments prepended.
    fn invoke(
        &self,
        classpath: &str,
        out_dir: &Path,
        args: &[String],
        sources: &[PathBuf],
    ) -> anyhow::Result<()>;
}

/// Compiler invoker that runs an external compiler command.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    /// The compiler executable (default: `javac`).
    pub program: String,
}

impl Default for CommandCompiler {
    fn default() -> Self {
        CommandCompiler {
            program: "javac".to_string(),
        }
    }
}

impl CompilerInvoker for CommandCompiler {
    fn invoke(
        &self,
        classpath: &str,
        out_dir: &Path,
        args: &[String],
        sources: &[PathBuf],
    ) -> anyhow::Result<()> {
        if sources.is_empty() {
            info!("no source files to compile");
            return Ok(());
        }
        std::fs::create_dir_all(out_dir)?;
        let status = Command::new(&self.program)
            .args(args)
            .arg("-cp")
            .arg(classpath)
            .arg("-d")
            .arg(out_dir)
            .args(sources)
            .status()
            .with_context(|| format!("Failed to invoke compiler '{}'", self.program))?;
        if !status.success() {
            bail!("Compiler '{}' exited with {status}", self.program);
        }
        Ok(())
    }
}

/// Collect the compilable source files under a directory.
pub fn source_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("java"))
        .map(|e| e.into_path())
        .collect()
}

/// Copy configured resource sets into the compile output.
///
/// Each entry's pattern selects files under its base directory (relative to
/// `default_base` when no directory is configured). A missing pattern is a
/// fatal configuration error; an unusable pattern skips the entry with a
/// warning.
pub fn copy_resources(
    resources: &[CopyResources],
    default_base: &Path,
    compile_dir: &Path,
) -> anyhow::Result<()> {
    for resource in resources {
        let Some(pattern) = resource.pattern.as_deref() else {
            bail!("A pattern must be specified for copying resources.");
        };
        let Some(matcher) = compile_pattern(pattern) else {
            warn!(pattern, "resources NOT copied");
            continue;
        };
        let base = resource
            .dir
            .clone()
            .unwrap_or_else(|| default_base.to_path_buf());

        for entry in WalkDir::new(&base).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&base)
                .expect("walkdir yields paths under the walk root");
            if matcher.is_match(normalize_for_match(rel)) {
                let dest = compile_dir.join(rel);
                archive::copy_file(entry.path(), &dest)?;
            }
        }
    }
    Ok(())
}
