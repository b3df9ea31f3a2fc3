//! # Generator Module
//!
//! Renders the webapp's deployment descriptors from the assembly
//! configuration.
//!
//! ## Overview
//!
//! The generate step produces the configuration files the deployed
//! application boots from:
//!
//! - `application-context.xml` - the root beans file: imports, default
//!   wiring attributes, global service interceptors
//! - `dispatcher-servlet.xml` - the dispatcher's handler mapping and
//!   handler interceptors
//! - `web.xml` - servlet/listener wiring, plus the security filter chain
//!   when security is enabled
//! - `security-context.xml` - the security filter chain, authentication
//!   providers, and entry points (only when security is enabled)
//!
//! ```text
//! AppConfig → DescriptorModel (validated) → Askama templates → XML files
//! ```
//!
//! Validation happens while building the [`DescriptorModel`]: an interceptor
//! or bean reference with neither a class nor a bean name, or a spring
//! import with both (or neither) of `file`/`uri`, is a fatal configuration
//! error. Rendering failures are fatal as well.

mod model;
mod templates;

pub use model::{BeanRefModel, DescriptorModel, SecurityModel};
pub use templates::{
    write_descriptors, APPLICATION_CONTEXT_XML, DISPATCHER_SERVLET_XML, SECURITY_CONTEXT_XML,
    WEB_XML,
};
