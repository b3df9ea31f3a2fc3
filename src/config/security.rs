use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Security configuration for the generated security context.
///
/// Mirrors the common cases of the deployed framework's security filter
/// chain; anything beyond these fields belongs in an imported beans file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Mount a form-based login endpoint.
    #[serde(default)]
    pub enable_form_based_login: bool,
    /// Mount a form-based logout endpoint.
    #[serde(default)]
    pub enable_form_based_logout: bool,
    /// Persist the authenticated identity across the HTTP session.
    #[serde(default)]
    pub persist_identity_across_http_session: bool,
    /// Issue a remember-me token cookie on authentication.
    #[serde(default)]
    pub enable_remember_me_token: bool,
    /// Load an anonymous identity when no credentials are supplied.
    #[serde(default)]
    pub load_anonymous_identity: bool,
    /// Enable HTTP Basic authentication (default: on).
    #[serde(default = "default_true")]
    pub enable_basic_http_auth: bool,
    /// Enable HTTP Digest authentication.
    #[serde(default)]
    pub enable_digest_http_auth: bool,
    /// Initialize the container security context from the current identity.
    #[serde(default = "default_true")]
    pub init_j2ee_security_context: bool,
    /// Security key used for hashes where needed. A build-time default is
    /// generated when unset.
    pub key: Option<String>,
    /// Realm name for the mechanisms that require one. Defaults to the
    /// configured label.
    pub realm_name: Option<String>,
    /// The user details service bean.
    pub user_details_service: Option<BeanRef>,
    /// Anonymous identity settings.
    pub anonymous: Option<AnonymousConfig>,
    /// HTTP Basic settings.
    pub basic_auth: Option<BasicAuthConfig>,
    /// HTTP Digest settings.
    pub digest_auth: Option<DigestAuthConfig>,
    /// Form login endpoint settings.
    pub form_login: Option<FormLoginConfig>,
    /// Form logout endpoint settings.
    pub form_logout: Option<FormLogoutConfig>,
    /// Remember-me token settings.
    pub remember_me: Option<RememberMeConfig>,
    /// Action on failed authentication.
    pub on_authentication_failed: Option<EntryPointConfig>,
    /// Action on denied access.
    pub on_access_denied: Option<EntryPointConfig>,
    /// Additional authentication provider beans.
    #[serde(default)]
    pub providers: Vec<BeanRef>,
    /// Additional security filter beans.
    #[serde(default)]
    pub filters: Vec<BeanRef>,
}

/// Reference to a bean: either by name in an imported context, or by class.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BeanRef {
    pub bean_name: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AnonymousConfig {
    /// Id of the anonymous user (default `anonymous`).
    pub user_id: Option<String>,
    /// Comma-separated roles granted to the anonymous identity (default
    /// `ANONYMOUS`).
    pub roles: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BasicAuthConfig {
    pub realm_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DigestAuthConfig {
    pub realm_name: Option<String>,
    pub key: Option<String>,
    /// How long a digest nonce stays valid (default 300 seconds).
    pub nonce_validity_seconds: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FormLoginConfig {
    /// Mount point of the login endpoint (default `/form/login`).
    pub url: Option<String>,
    pub redirect_on_success_url: Option<String>,
    pub redirect_on_failure_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FormLogoutConfig {
    /// Mount point of the logout endpoint (default `/form/logout`).
    pub url: Option<String>,
    pub redirect_on_success_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RememberMeConfig {
    pub key: Option<String>,
    /// Cookie holding the token (default `REMEMBER_ME_TOKEN`).
    pub cookie_name: Option<String>,
    /// Token validity (default 14 days).
    pub token_validity_seconds: Option<u32>,
}

/// Action taken on an authentication failure or access denial: redirect, or
/// delegate to an entry point bean.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EntryPointConfig {
    pub redirect_to: Option<String>,
    pub use_entry_point: Option<BeanRef>,
}
