//! # CLI Module
//!
//! Command-line interface for the assembly tool.
//!
//! ## Commands
//!
//! ### `assemble`
//!
//! Run the full pipeline - generate, compile, build, package:
//!
//! ```bash
//! warpack assemble --config app.yaml --classpath "$CLASSPATH" \
//!     --sources src/main/java --docs target/docs
//! ```
//!
//! ### `classify`
//!
//! Show how the configured lib rules partition the classpath, without
//! assembling anything:
//!
//! ```bash
//! warpack classify --config app.yaml --classpath "$CLASSPATH"
//! ```
//!
//! ### `generate`
//!
//! Render the deployment descriptors only:
//!
//! ```bash
//! warpack generate --config app.yaml --out target/config
//! ```
//!
//! Logging is controlled through `RUST_LOG` (default level: `info`).

mod commands;

pub use commands::{run_cli, Cli, Commands};
