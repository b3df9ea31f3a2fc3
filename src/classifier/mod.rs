//! # Library Classifier
//!
//! Decides which classpath entries ship in the assembled webapp.
//!
//! ## Overview
//!
//! The webapp's `WEB-INF/lib` is populated from the build classpath, but the
//! classpath also carries archives that only matter at build time: the
//! compiler tooling, annotation-processing support, template engines, and the
//! build engine itself. The classifier partitions the candidate set:
//!
//! - **Bundle** - runtime API dependencies, copied into `WEB-INF/lib`
//!   (directory entries have their *contents* merged into `WEB-INF/classes`
//!   instead)
//! - **Exclude** - build-time-only archives, left out of the webapp; an
//!   exclude rule can still record the archive's file name in the manifest
//!   `Class-Path` for deployments that provide it externally (an ear with
//!   shared libraries, a container-provided api)
//!
//! ## Evaluation order
//!
//! 1. Seed: the classpath (unless classpath seeding is off) plus explicit
//!    include files.
//! 2. Include filter: entries matching any include *pattern*; with no pattern
//!    rules configured the implicit `**/*` keeps everything.
//! 3. Exclude filter, per entry, first match wins in declaration order:
//!    the preserve marker forces Bundle before anything else; then the
//!    built-in signature table (when enabled); then user rules (explicit file
//!    equality, else pattern match).
//! 4. Explicit include files are appended last and are never excluded.
//!
//! Patterns use glob segment semantics: `*` matches within a path segment,
//! `**` spans segments. Matching happens against the absolute path with `/`
//! separators and one leading separator stripped, so patterns stay portable
//! across root-relative conventions.
//!
//! ## Signatures
//!
//! A signature is the presence of a well-known entry inside the archive
//! (e.g. the compiler tooling's main class). The table lives in
//! [`signatures::BUILD_TIME_SIGNATURES`] as static data; probing opens the
//! candidate archive directly and releases it immediately, with no shared
//! loader state, so unrelated archives can never produce a false positive.

mod classify;
mod matcher;
pub mod signatures;

pub use classify::{
    CandidatePath, Classification, Classifier, ExcludeReason, ExcludedEntry,
};
pub use matcher::{compile_pattern, normalize_for_match};
pub use signatures::{probe_archive, ArchiveProbe, Signature, PRESERVE_MARKER};
