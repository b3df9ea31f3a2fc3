//! # Configuration Module
//!
//! Declarative configuration for the webapp assembly, loaded from a YAML file.
//!
//! ## Overview
//!
//! The configuration mirrors the structure of the assembly itself:
//!
//! - top-level attributes control the pipeline (`do_compile`, `do_lib_copy`,
//!   `do_package`, `enable_security`, dispatcher/listener class names)
//! - the `war` section controls archive assembly: name, base directories,
//!   lib include/exclude rules, and manifest attributes
//! - `spring_imports`, `global_service_interceptors`, and
//!   `handler_interceptors` feed the generated dispatcher descriptors
//! - `copy_resources` copies pattern-matched files into the compile output
//! - the `security` section configures the generated security context
//!
//! ## Example
//!
//! ```yaml
//! label: petstore-api
//! enable_security: true
//! war:
//!   name: petstore.war
//!   exclude_libs:
//!     - pattern: "**/*-tools.jar"
//!     - file: /opt/build/shared-api.jar
//!       include_in_manifest: true
//! spring_imports:
//!   - file: beans/services.xml
//! security:
//!   realm_name: Pet Store API
//! ```
//!
//! All fields are optional; defaults match a bare assembly that bundles the
//! whole classpath and generates unsecured descriptors.

mod app;
mod security;
mod war;

pub use app::{load_config, AppConfig, CopyResources, InterceptorConfig, SpringImport};
pub use security::{
    AnonymousConfig, BasicAuthConfig, BeanRef, DigestAuthConfig, EntryPointConfig,
    FormLoginConfig, FormLogoutConfig, RememberMeConfig, SecurityConfig,
};
pub use war::{LibRule, ManifestAttribute, WarConfig};
