use std::net::IpAddr;
use std::time::Duration;

use actix_web::http::header::HeaderName;
use clap::Parser;
use url::Url;

use crate::jwk::{JwksUrl, KeySetConfig};
use crate::proxy::DEFAULT_SCRIPT_NAME_HEADER;

/// Command-line and environment configuration of the inspection server.
#[derive(Debug, Clone, Parser)]
#[command(name = "bearer-inspect", version, about)]
pub struct Config {
    /// Base URL of the identity provider, e.g. `https://idp.example.com`.
    #[arg(long, env = "IDP_HOST")]
    pub idp_host: Url,

    /// Realm whose signing keys verify tokens.
    #[arg(long, env = "IDP_REALM", default_value = "DominoRealm")]
    pub realm: String,

    /// Audience every token must carry.
    #[arg(long, env = "TOKEN_AUDIENCE", default_value = KeySetConfig::DEFAULT_AUDIENCE)]
    pub audience: String,

    /// Address to bind.
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(short, long, env = "PORT", default_value_t = 8888)]
    pub port: u16,

    /// Seconds to wait for the key set before giving up.
    #[arg(long, env = "JWKS_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Clock skew tolerated on `exp`, in seconds.
    #[arg(long, env = "TOKEN_LEEWAY_SECS", default_value_t = 0)]
    pub leeway_secs: u64,

    /// Header a reverse proxy uses to announce the mount prefix.
    #[arg(long, env = "SCRIPT_NAME_HEADER", default_value = DEFAULT_SCRIPT_NAME_HEADER)]
    pub script_name_header: String,

    /// Verbose logging when `RUST_LOG` is not set.
    #[arg(long, env = "DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Key-set settings derived from the identity provider options.
    pub fn key_set_config(&self) -> crate::Result<KeySetConfig> {
        let jwks_url = JwksUrl::new(&self.idp_host, &self.realm)
            .ok_or_else(|| crate::Error::InvalidIdpHost(self.idp_host.clone()))?;

        Ok(KeySetConfig::new(jwks_url)
            .with_audience(&self.audience)
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_leeway(self.leeway_secs))
    }

    /// Parsed script-name header.
    pub fn script_name_header(&self) -> crate::Result<HeaderName> {
        HeaderName::try_from(self.script_name_header.as_str())
            .map_err(|_| crate::Error::InvalidHeaderName(self.script_name_header.clone()))
    }
}
