use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use super::security::SecurityConfig;
use super::war::WarConfig;

fn default_true() -> bool {
    true
}

fn default_dispatcher_servlet_class() -> String {
    "org.springframework.web.servlet.DispatcherServlet".to_string()
}

fn default_context_loader_listener_class() -> String {
    "org.springframework.web.context.ContextLoaderListener".to_string()
}

/// Root configuration for one assembly invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Label for the assembled application; used for the default archive name
    /// and the default security realm.
    pub label: Option<String>,
    /// Whether the generated descriptors wire up the security context.
    #[serde(default)]
    pub enable_security: bool,
    /// Whether compiled classes carry debug info.
    #[serde(default = "default_true")]
    pub compile_debug_info: bool,
    /// Fully qualified class of the dispatcher servlet.
    #[serde(default = "default_dispatcher_servlet_class")]
    pub dispatcher_servlet_class: String,
    /// Fully qualified class of the context loader listener.
    #[serde(default = "default_context_loader_listener_class")]
    pub context_loader_listener_class: String,
    /// `default-autowire` value for the generated beans file.
    pub default_autowire: Option<String>,
    /// `default-dependency-check` value for the generated beans file.
    pub default_dependency_check: Option<String>,
    /// Whether this invocation compiles the server-side classes.
    #[serde(default = "default_true")]
    pub do_compile: bool,
    /// Whether this invocation copies libraries into `WEB-INF/lib`.
    #[serde(default = "default_true")]
    pub do_lib_copy: bool,
    /// Whether this invocation zips the expanded webapp.
    #[serde(default = "default_true")]
    pub do_package: bool,
    /// Archive assembly configuration.
    pub war: Option<WarConfig>,
    /// Extra beans files imported by the generated dispatcher config.
    #[serde(default)]
    pub spring_imports: Vec<SpringImport>,
    /// Pattern-matched resources copied into the compile output.
    #[serde(default)]
    pub copy_resources: Vec<CopyResources>,
    /// Interceptors injected on every service endpoint bean.
    #[serde(default)]
    pub global_service_interceptors: Vec<InterceptorConfig>,
    /// Interceptors injected on the handler mapping.
    #[serde(default)]
    pub handler_interceptors: Vec<InterceptorConfig>,
    /// Security context configuration; only consulted when `enable_security`.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        serde_yaml::from_str("{}").expect("empty config deserializes")
    }
}

/// A beans file imported by the generated dispatcher configuration.
///
/// Exactly one of `file` (copied into `WEB-INF` and imported by name) or
/// `uri` (imported verbatim, e.g. `classpath:com/myco/config.xml`) must be
/// set; anything else is a fatal configuration error at generate time.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SpringImport {
    pub file: Option<PathBuf>,
    pub uri: Option<String>,
}

/// An interceptor bean, referenced by class or by bean name.
///
/// One of the two must be set; anything else is a fatal configuration error
/// at generate time.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct InterceptorConfig {
    pub interceptor_class: Option<String>,
    pub bean_name: Option<String>,
}

/// A set of resources to copy into the compile output.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CopyResources {
    /// Base directory of the resources; defaults to the config file's
    /// directory.
    pub dir: Option<PathBuf>,
    /// Glob pattern selecting files under the base directory. Required.
    pub pattern: Option<String>,
}

/// Load the assembly configuration from a YAML file.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.do_compile && cfg.do_lib_copy && cfg.do_package);
        assert!(!cfg.enable_security);
        assert_eq!(
            cfg.dispatcher_servlet_class,
            "org.springframework.web.servlet.DispatcherServlet"
        );
        assert!(cfg.war.is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let cfg: AppConfig = serde_yaml::from_str(
            r#"
label: petstore
enable_security: true
war:
  name: petstore.war
  include_libs:
    - pattern: "**/api-*.jar"
spring_imports:
  - uri: "classpath:com/myco/spring/config.xml"
global_service_interceptors:
  - interceptor_class: com.myco.AuditInterceptor
security:
  realm_name: Pet Store
  providers:
    - bean_name: ldapProvider
"#,
        )
        .unwrap();
        assert_eq!(cfg.label.as_deref(), Some("petstore"));
        assert!(cfg.enable_security);
        assert_eq!(cfg.war.unwrap().include_libs.len(), 1);
        assert_eq!(cfg.security.providers.len(), 1);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = serde_yaml::from_str::<AppConfig>("wat: true").unwrap_err();
        assert!(err.to_string().contains("wat"));
    }
}
