use jsonwebtoken::DecodingKey;
use tracing::{debug, warn};
use url::Url;

use super::config::KeySetConfig;
use super::error::{KeySetError, VerificationError, VerificationResult};
use super::key::KeySet;

/// Finds the public key a token was signed with.
///
/// Every call fetches the key set again; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    http: reqwest::Client,
    jwks_url: Url,
}

impl KeyResolver {
    /// Creates a resolver whose fetches give up after the configured timeout.
    pub fn new(config: &KeySetConfig) -> reqwest::Result<KeyResolver> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()?;

        Ok(KeyResolver {
            http,
            jwks_url: config.jwks_url().clone(),
        })
    }

    /// Reads the token's `kid` and returns the matching published key.
    ///
    /// The header is inspected before any network access, so tokens without
    /// a `kid` never reach the identity provider.
    pub async fn resolve(&self, token: &str) -> VerificationResult<DecodingKey> {
        let kid = key_id(token)?;
        let key_set = self.fetch_key_set().await.inspect_err(|err| {
            warn!(url = %self.jwks_url, "Failed to fetch signing keys: {err}");
        })?;

        let Some(entry) = key_set.find(&kid) else {
            debug!(%kid, published = key_set.len(), "No signing key for kid");
            return Err(VerificationError::UnknownKeyId(kid));
        };

        debug!(
            %kid,
            kty = ?entry.kty,
            alg = ?entry.alg,
            usage = ?entry.usage,
            "Resolved signing key"
        );

        Ok(entry.decoding_key()?)
    }

    /// Fetches and parses the realm's key set.
    pub async fn fetch_key_set(&self) -> Result<KeySet, KeySetError> {
        debug!(url = %self.jwks_url, "Fetching signing keys");

        let response = self
            .http
            .get(self.jwks_url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(KeySetError::FetchKeySet)?;

        response
            .json::<KeySet>()
            .await
            .map_err(KeySetError::KeySetParseError)
    }
}

/// Extracts `kid` from the unverified token header.
fn key_id(token: &str) -> VerificationResult<String> {
    let header = jsonwebtoken::decode_header(token)
        .map_err(|err| VerificationError::InvalidToken(err.to_string()))?;

    header.kid.ok_or(VerificationError::MissingKeyId)
}
