//! # warpack
//!
//! **warpack** assembles a deployable, Spring-based web application archive
//! (a WAR) from build outputs: generated deployment descriptors, compiled
//! classes, and a filtered copy of the build classpath.
//!
//! ## Overview
//!
//! The interesting problem is deciding which classpath archives belong in
//! the deployed application. A build classpath mixes runtime API
//! dependencies with archives that only matter while the build engine runs:
//! the compiler tooling, annotation-processing support, template engines,
//! the build engine itself. warpack resolves that with the
//! [`classifier`] - glob include/exclude rules layered over a built-in table
//! of known build-time archive fingerprints, with manifest `Class-Path`
//! bookkeeping for archives that are excluded but still referenced by the
//! deployment.
//!
//! ## Architecture
//!
//! - **[`classifier`]** - the library include/exclude resolution core
//! - **[`config`]** - declarative assembly configuration (war, imports,
//!   interceptors, security)
//! - **[`generator`]** - renders the dispatcher/security deployment
//!   descriptors from the configuration
//! - **[`compiler`]** - delegation seam for compiling source sets
//! - **[`assembly`]** - the four-step pipeline: generate, compile, build,
//!   package
//! - **[`manifest`]** - `META-INF/MANIFEST.MF` assembly
//! - **[`archive`]** - zip, extract, and recursive copy utilities
//! - **[`artifacts`]** - named build outputs exchanged between steps
//! - **[`cli`]** - the `warpack` command-line interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use warpack::assembly::{Assembler, AssemblyContext};
//! use warpack::config::load_config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = load_config("app.yaml".as_ref())?;
//! let mut ctx = AssemblyContext::new("target/warpack", ".");
//! ctx.set_classpath_from_str(&std::env::var("CLASSPATH").unwrap_or_default());
//!
//! let mut assembler = Assembler::new(config, ctx);
//! assembler.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Classifying without assembling
//!
//! ```no_run
//! use warpack::classifier::{CandidatePath, Classifier};
//!
//! # fn main() -> anyhow::Result<()> {
//! let classifier = Classifier::from_war_config(None)?;
//! let candidates: Vec<CandidatePath> = std::env::split_paths(
//!     &std::env::var("CLASSPATH").unwrap_or_default(),
//! )
//! .map(CandidatePath::new)
//! .collect();
//! let result = classifier.classify(&candidates);
//! for lib in &result.bundle_files {
//!     println!("ship {}", lib.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod artifacts;
pub mod assembly;
pub mod classifier;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod generator;
pub mod manifest;

pub use assembly::{Assembler, AssemblyContext};
pub use classifier::{
    CandidatePath, Classification, Classifier, ExcludeReason, ExcludedEntry,
};
pub use config::{load_config, AppConfig, LibRule, WarConfig};
