//! # Assembly Module
//!
//! Drives the four build steps that produce the deployable webapp:
//!
//! 1. **generate** - render the deployment descriptors (see
//!    [`crate::generator`])
//! 2. **compile** - hand source sets to the configured
//!    [`crate::compiler::CompilerInvoker`] and copy configured resources
//! 3. **build** - assemble the expanded webapp directory: bases, classes,
//!    the classified libraries, manifest, descriptors, docs and client apps
//! 4. **package** - zip the expanded directory into the final archive
//!
//! Steps run strictly in sequence within one invocation; each step either
//! completes or fails the build with a contextual error. The `do_compile`,
//! `do_lib_copy`, and `do_package` switches skip their steps for invocations
//! that only want the war structure and configuration files.

mod context;
mod pipeline;

pub use context::{AssemblyContext, SourceSet};
pub use pipeline::Assembler;
