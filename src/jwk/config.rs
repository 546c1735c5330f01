use std::ops::Deref;
use std::time::Duration;

use url::Url;

/// Location of a realm's published signing keys.
#[derive(Debug, Clone)]
pub struct JwksUrl(Url);

impl JwksUrl {
    /// Builds `{idp_host}/auth/realms/{realm}/protocol/openid-connect/certs`.
    ///
    /// Returns `None` when `idp_host` cannot carry a path (e.g. `mailto:`).
    pub fn new(idp_host: &Url, realm: impl AsRef<str>) -> Option<JwksUrl> {
        let mut url = idp_host.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut().ok()?.pop_if_empty().extend([
            "auth",
            "realms",
            realm.as_ref(),
            "protocol",
            "openid-connect",
            "certs",
        ]);
        Some(JwksUrl(url))
    }
}

impl From<Url> for JwksUrl {
    fn from(url: Url) -> Self {
        JwksUrl(url)
    }
}

impl Deref for JwksUrl {
    type Target = Url;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Settings shared by the key resolver and the token verifier.
#[derive(Debug, Clone)]
pub struct KeySetConfig {
    jwks_url: JwksUrl,
    audience: String,
    fetch_timeout: Duration,
    leeway: u64,
}

impl KeySetConfig {
    /// Audience every inspected token must carry unless overridden.
    pub const DEFAULT_AUDIENCE: &str = "apps";

    /// Upper bound on a single key-set fetch unless overridden.
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the default audience, timeout and no leeway.
    pub fn new(jwks_url: impl Into<JwksUrl>) -> KeySetConfig {
        KeySetConfig {
            jwks_url: jwks_url.into(),
            audience: Self::DEFAULT_AUDIENCE.to_owned(),
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
            leeway: 0,
        }
    }

    /// Sets the expected `aud` claim.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Sets the key-set fetch timeout.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sets the clock skew tolerated on `exp`, in seconds.
    #[must_use]
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Discovery endpoint for the key set.
    pub fn jwks_url(&self) -> &Url {
        &self.jwks_url
    }

    /// Expected `aud` claim.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Key-set fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Clock skew tolerated on `exp`, in seconds.
    pub fn leeway(&self) -> u64 {
        self.leeway
    }
}
