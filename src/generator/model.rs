use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::bail;

use crate::config::{AppConfig, BeanRef, InterceptorConfig, SecurityConfig};

/// Validated, defaulted inputs for the descriptor templates.
#[derive(Debug, Clone)]
pub struct DescriptorModel {
    pub spring_import_uris: Vec<String>,
    pub default_autowire: Option<String>,
    pub default_dependency_check: Option<String>,
    pub context_loader_listener_class: String,
    pub dispatcher_servlet_class: String,
    /// Normalized docs directory: empty, or a path with a trailing `/`.
    pub docs_dir: String,
    pub global_service_interceptors: Vec<BeanRefModel>,
    pub handler_interceptors: Vec<BeanRefModel>,
    pub security_enabled: bool,
    pub security: SecurityModel,
}

/// A resolved bean reference: exactly one of `bean_name` / `class_name` set.
#[derive(Debug, Clone)]
pub struct BeanRefModel {
    pub bean_name: Option<String>,
    pub class_name: Option<String>,
}

impl BeanRefModel {
    /// Render as a beans-file element: a `<ref/>` for named beans, an inline
    /// `<bean/>` for class references.
    pub fn as_bean_xml(&self) -> String {
        match (&self.bean_name, &self.class_name) {
            (Some(name), _) => format!("<ref bean=\"{name}\"/>"),
            (None, Some(class)) => format!("<bean class=\"{class}\"/>"),
            (None, None) => unreachable!("validated at model construction"),
        }
    }
}

/// Validated, defaulted security settings for the security context template.
#[derive(Debug, Clone)]
pub struct SecurityModel {
    pub realm_name: String,
    pub key: String,
    pub enable_basic_http_auth: bool,
    pub enable_digest_http_auth: bool,
    pub enable_form_based_login: bool,
    pub enable_form_based_logout: bool,
    pub load_anonymous_identity: bool,
    pub enable_remember_me_token: bool,
    pub persist_identity_across_http_session: bool,
    pub init_j2ee_security_context: bool,
    pub user_details_service: Option<BeanRefModel>,
    pub anonymous_user_id: String,
    pub anonymous_roles: String,
    pub anonymous_key: String,
    pub basic_realm: String,
    pub digest_realm: String,
    pub digest_key: String,
    pub digest_nonce_validity_seconds: u32,
    pub form_login_url: String,
    pub form_login_redirect_on_success: String,
    pub form_login_redirect_on_failure: String,
    pub form_logout_url: String,
    pub form_logout_redirect_on_success: String,
    pub remember_me_key: String,
    pub remember_me_cookie_name: String,
    pub remember_me_token_validity_seconds: u32,
    pub on_authentication_failed_redirect: Option<String>,
    pub on_authentication_failed_entry_point: Option<BeanRefModel>,
    pub on_access_denied_redirect: Option<String>,
    pub on_access_denied_entry_point: Option<BeanRefModel>,
    pub providers: Vec<BeanRefModel>,
    pub filters: Vec<BeanRefModel>,
}

impl DescriptorModel {
    /// Build and validate the template model from the configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let mut spring_import_uris = Vec::with_capacity(config.spring_imports.len());
        for import in &config.spring_imports {
            match (&import.file, &import.uri) {
                (Some(_), Some(_)) => {
                    bail!("A spring import must specify a file or a URI, but not both.")
                }
                (Some(file), None) => {
                    let name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    spring_import_uris.push(name);
                }
                (None, Some(uri)) => spring_import_uris.push(uri.clone()),
                (None, None) => {
                    bail!("A spring import must specify either a file or a URI.")
                }
            }
        }

        let global_service_interceptors =
            interceptor_models(&config.global_service_interceptors, "global service")?;
        let handler_interceptors = interceptor_models(&config.handler_interceptors, "handler")?;

        let docs_dir = match config.war.as_ref().and_then(|w| w.docs_dir.as_deref()) {
            Some(dir) => {
                let dir = dir.trim();
                if dir.is_empty() || dir.ends_with('/') {
                    dir.to_string()
                } else {
                    format!("{dir}/")
                }
            }
            None => String::new(),
        };

        Ok(DescriptorModel {
            spring_import_uris,
            default_autowire: config.default_autowire.clone(),
            default_dependency_check: config.default_dependency_check.clone(),
            context_loader_listener_class: config.context_loader_listener_class.clone(),
            dispatcher_servlet_class: config.dispatcher_servlet_class.clone(),
            docs_dir,
            global_service_interceptors,
            handler_interceptors,
            security_enabled: config.enable_security,
            security: SecurityModel::from_config(&config.security, config.label.as_deref())?,
        })
    }
}

impl SecurityModel {
    fn from_config(security: &SecurityConfig, label: Option<&str>) -> anyhow::Result<Self> {
        let realm_name = security
            .realm_name
            .clone()
            .or_else(|| label.map(|l| l.to_string()))
            .unwrap_or_else(|| "Generic Application Realm".to_string());
        let key = security.key.clone().unwrap_or_else(build_time_key);

        let anonymous = security.anonymous.clone().unwrap_or_default();
        let basic = security.basic_auth.clone().unwrap_or_default();
        let digest = security.digest_auth.clone().unwrap_or_default();
        let login = security.form_login.clone().unwrap_or_default();
        let logout = security.form_logout.clone().unwrap_or_default();
        let remember = security.remember_me.clone().unwrap_or_default();

        let on_auth_failed = security.on_authentication_failed.clone().unwrap_or_default();
        let on_access_denied = security.on_access_denied.clone().unwrap_or_default();

        Ok(SecurityModel {
            enable_basic_http_auth: security.enable_basic_http_auth,
            enable_digest_http_auth: security.enable_digest_http_auth,
            enable_form_based_login: security.enable_form_based_login,
            enable_form_based_logout: security.enable_form_based_logout,
            load_anonymous_identity: security.load_anonymous_identity,
            enable_remember_me_token: security.enable_remember_me_token,
            persist_identity_across_http_session: security.persist_identity_across_http_session,
            init_j2ee_security_context: security.init_j2ee_security_context,
            user_details_service: security
                .user_details_service
                .as_ref()
                .map(|r| bean_ref_model(r, "user details service"))
                .transpose()?,
            anonymous_user_id: anonymous.user_id.unwrap_or_else(|| "anonymous".to_string()),
            anonymous_roles: anonymous.roles.unwrap_or_else(|| "ANONYMOUS".to_string()),
            anonymous_key: anonymous.key.unwrap_or_else(|| key.clone()),
            basic_realm: basic.realm_name.unwrap_or_else(|| realm_name.clone()),
            digest_realm: digest.realm_name.unwrap_or_else(|| realm_name.clone()),
            digest_key: digest.key.unwrap_or_else(|| key.clone()),
            digest_nonce_validity_seconds: digest.nonce_validity_seconds.unwrap_or(300),
            form_login_url: login.url.unwrap_or_else(|| "/form/login".to_string()),
            form_login_redirect_on_success: login
                .redirect_on_success_url
                .unwrap_or_else(|| "/".to_string()),
            form_login_redirect_on_failure: login
                .redirect_on_failure_url
                .unwrap_or_else(|| "/".to_string()),
            form_logout_url: logout.url.unwrap_or_else(|| "/form/logout".to_string()),
            form_logout_redirect_on_success: logout
                .redirect_on_success_url
                .unwrap_or_else(|| "/".to_string()),
            remember_me_key: remember.key.unwrap_or_else(|| key.clone()),
            remember_me_cookie_name: remember
                .cookie_name
                .unwrap_or_else(|| "REMEMBER_ME_TOKEN".to_string()),
            remember_me_token_validity_seconds: remember
                .token_validity_seconds
                .unwrap_or(14 * 24 * 60 * 60),
            on_authentication_failed_redirect: on_auth_failed.redirect_to,
            on_authentication_failed_entry_point: on_auth_failed
                .use_entry_point
                .as_ref()
                .map(|r| bean_ref_model(r, "authentication entry point"))
                .transpose()?,
            on_access_denied_redirect: on_access_denied.redirect_to,
            on_access_denied_entry_point: on_access_denied
                .use_entry_point
                .as_ref()
                .map(|r| bean_ref_model(r, "access denied handler"))
                .transpose()?,
            providers: security
                .providers
                .iter()
                .map(|r| bean_ref_model(r, "authentication provider"))
                .collect::<anyhow::Result<_>>()?,
            filters: security
                .filters
                .iter()
                .map(|r| bean_ref_model(r, "security filter"))
                .collect::<anyhow::Result<_>>()?,
            realm_name,
            key,
        })
    }
}

fn interceptor_models(
    interceptors: &[InterceptorConfig],
    kind: &str,
) -> anyhow::Result<Vec<BeanRefModel>> {
    interceptors
        .iter()
        .map(|i| {
            if i.bean_name.is_none() && i.interceptor_class.is_none() {
                bail!("A {kind} interceptor must have either a bean name or a class set.");
            }
            Ok(BeanRefModel {
                bean_name: i.bean_name.clone(),
                class_name: i.interceptor_class.clone(),
            })
        })
        .collect()
}

fn bean_ref_model(r: &BeanRef, what: &str) -> anyhow::Result<BeanRefModel> {
    if r.bean_name.is_none() && r.class_name.is_none() {
        bail!("A {what} must have either a bean name or a class name set.");
    }
    Ok(BeanRefModel {
        bean_name: r.bean_name.clone(),
        class_name: r.class_name.clone(),
    })
}

/// Default security key when none is configured: the build timestamp, which
/// is stable within one invocation and unguessable enough for a default.
fn build_time_key() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpringImport;

    #[test]
    fn test_spring_import_validation() {
        let mut config = AppConfig::default();
        config.spring_imports = vec![SpringImport {
            file: Some("beans/services.xml".into()),
            uri: Some("classpath:other.xml".to_string()),
        }];
        assert!(DescriptorModel::from_config(&config).is_err());

        config.spring_imports = vec![SpringImport::default()];
        assert!(DescriptorModel::from_config(&config).is_err());

        config.spring_imports = vec![SpringImport {
            file: Some("beans/services.xml".into()),
            uri: None,
        }];
        let model = DescriptorModel::from_config(&config).unwrap();
        assert_eq!(model.spring_import_uris, vec!["services.xml".to_string()]);
    }

    #[test]
    fn test_interceptor_validation() {
        let mut config = AppConfig::default();
        config.global_service_interceptors = vec![InterceptorConfig::default()];
        let err = DescriptorModel::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("global service interceptor"));
    }

    #[test]
    fn test_docs_dir_normalization() {
        let mut config = AppConfig::default();
        config.war = Some(crate::config::WarConfig {
            docs_dir: Some("api-docs".to_string()),
            ..Default::default()
        });
        let model = DescriptorModel::from_config(&config).unwrap();
        assert_eq!(model.docs_dir, "api-docs/");
    }

    #[test]
    fn test_security_defaults() {
        let mut config = AppConfig::default();
        config.label = Some("petstore".to_string());
        let model = DescriptorModel::from_config(&config).unwrap();
        assert_eq!(model.security.realm_name, "petstore");
        assert!(model.security.enable_basic_http_auth);
        assert_eq!(model.security.digest_nonce_validity_seconds, 300);
        assert_eq!(model.security.form_login_url, "/form/login");
        assert!(!model.security.key.is_empty());
    }
}
