//! Target orchestrator settings.

use std::collections::BTreeMap;

use labwire_types::DEFAULT_LAB_NAME;
use reqwest::Url;
use zeroize::Zeroizing;

/// Default orchestrator API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
/// Default Linux user the orchestrator acts as.
pub const DEFAULT_API_USER: &str = "lab";

/// Header naming the user the orchestrator should act as.
pub const USER_HEADER: &str = "X-Clab-User";

const API_URL_VAR: &str = "LABWIRE_API_URL";
const API_USER_VAR: &str = "LABWIRE_API_USER";
const API_TOKEN_VAR: &str = "LABWIRE_API_TOKEN";
const LAB_NAME_VAR: &str = "LABWIRE_LAB_NAME";

/// The shared secret the relay signs a bearer token with.
///
/// Zeroed on drop. Only readable inside [`ApiToken::with_str`].
pub struct ApiToken {
    inner: Zeroizing<String>,
}

impl ApiToken {
    /// Wrap a token. The string is moved, not copied.
    pub fn new(token: String) -> Self {
        Self {
            inner: Zeroizing::new(token),
        }
    }

    /// Scoped exposure.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.inner)
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Where and as whom to deploy.
///
/// ```
/// use labwire_deploy::DeployConfig;
///
/// let config = DeployConfig::new()
///     .api_url("https://clab.example.net/api/v1")
///     .user("netops")
///     .lab_name("ospf-lab");
/// assert_eq!(config.destroy_url(), "https://clab.example.net/api/v1/labs/ospf-lab?cleanup=true");
/// ```
#[derive(Debug)]
pub struct DeployConfig {
    api_url: String,
    user: String,
    token: Option<ApiToken>,
    lab_name: String,
}

impl DeployConfig {
    /// Local defaults: `http://localhost:8080/api/v1`, user `lab`, no token,
    /// lab `clab-visual-lab`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            user: DEFAULT_API_USER.into(),
            token: None,
            lab_name: DEFAULT_LAB_NAME.into(),
        }
    }

    /// Read `LABWIRE_API_URL`, `LABWIRE_API_USER`, `LABWIRE_API_TOKEN` and
    /// `LABWIRE_LAB_NAME`. Unset or empty variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Self::new();
        if let Some(url) = var(API_URL_VAR) {
            config = config.api_url(url);
        }
        if let Some(user) = var(API_USER_VAR) {
            config = config.user(user);
        }
        if let Some(token) = var(API_TOKEN_VAR) {
            config = config.token(token);
        }
        if let Some(lab) = var(LAB_NAME_VAR) {
            config = config.lab_name(lab);
        }
        config
    }

    /// Orchestrator API base URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// User the orchestrator acts as.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Shared secret for bearer signing. An empty token means none.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        let token = ApiToken::new(token.into());
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Lab name. Empty means the default.
    #[must_use]
    pub fn lab_name(mut self, name: impl Into<String>) -> Self {
        self.lab_name = name.into();
        self
    }

    /// The configured API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_url
    }

    /// The lab name actually used.
    pub fn effective_lab_name(&self) -> &str {
        if self.lab_name.is_empty() {
            DEFAULT_LAB_NAME
        } else {
            &self.lab_name
        }
    }

    /// `{api}/labs?reconfigure=true`
    pub fn deploy_url(&self) -> String {
        format!("{}/labs?reconfigure=true", self.api_url)
    }

    /// `{api}/labs/{lab}?cleanup=true`, the lab name escaped as one path
    /// segment.
    pub fn destroy_url(&self) -> String {
        let lab = self.effective_lab_name();
        let labs = format!("{}/labs", self.api_url);
        let Ok(mut url) = Url::parse(&labs) else {
            // Not an absolute URL; the relay reports it.
            return format!("{labs}/{lab}?cleanup=true");
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(lab);
        }
        url.set_query(Some("cleanup=true"));
        url.into()
    }

    /// Headers for the downstream request.
    ///
    /// The `secret:` prefix asks the relay to sign a bearer token with the
    /// secret rather than forward it.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(USER_HEADER.to_owned(), self.user.clone());
        if let Some(token) = &self.token {
            let value = token.with_str(|t| format!("Bearer secret:{t}"));
            headers.insert("Authorization".to_owned(), value);
        }
        headers
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::new()
    }
}
