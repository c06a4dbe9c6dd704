//! Gateway initialization settings.

use std::collections::HashMap;
use std::time::Duration;

/// Default per-request timeout for calls to a gateway.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(60);

/// Which gateway environment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    #[default]
    Sandbox,
    Production,
}

impl GatewayMode {
    /// `SANDBOX` (any case) selects the sandbox; anything else is production.
    pub fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("sandbox") {
            Self::Sandbox
        } else {
            Self::Production
        }
    }
}

/// Credentials and mode consumed once when a connector is initialized.
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub credentials: HashMap<String, String>,
    pub mode: GatewayMode,
    /// Replaces the provider's default base URL when set.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl PaymentSettings {
    pub fn new(mode: GatewayMode) -> Self {
        Self {
            credentials: HashMap::new(),
            mode,
            base_url: None,
            timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }

    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(key.into(), value.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the named credential, or an empty string when it is missing.
    pub fn credential(&self, key: &str) -> &str {
        self.credentials.get(key).map(String::as_str).unwrap_or_default()
    }
}
