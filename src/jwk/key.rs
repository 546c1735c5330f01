use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use jsonwebtoken::DecodingKey;
use openssl::x509::X509;
use serde::Deserialize;

use super::error::KeySetError;

/// Body of the realm's `certs` endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct KeySet {
    pub(crate) keys: Vec<SigningKey>,
}

impl KeySet {
    /// Returns the first key published under `kid`. Entries without an
    /// identifier never match.
    pub fn find(&self, kid: &str) -> Option<&SigningKey> {
        self.keys
            .iter()
            .find(|key| !key.kid.is_empty() && key.kid == kid)
    }

    /// Number of published keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set publishes no keys at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// One entry of a key set.
#[derive(Clone, Debug, Deserialize)]
pub struct SigningKey {
    /// Empty when the entry publishes no `kid`.
    #[serde(default)]
    pub(crate) kid: String,
    #[serde(default)]
    pub(crate) kty: Option<String>,
    #[serde(default)]
    pub(crate) alg: Option<String>,
    #[serde(default, rename = "use")]
    pub(crate) usage: Option<String>,
    /// Certificate chain, leaf first, each entry base64 (not url-safe) DER.
    #[serde(default)]
    pub(crate) x5c: Vec<String>,
    #[serde(default)]
    pub(crate) n: Option<String>,
    #[serde(default)]
    pub(crate) e: Option<String>,
}

impl SigningKey {
    /// Key identifier.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Declared algorithm, if any.
    pub fn alg(&self) -> Option<&str> {
        self.alg.as_deref()
    }

    /// Converts the leaf certificate into an RSA verification key.
    ///
    /// Entries without a certificate fall back to their `n`/`e` components.
    pub fn decoding_key(&self) -> Result<DecodingKey, KeySetError> {
        if let Some(leaf) = self.x5c.first() {
            return self.decode_certificate(leaf);
        }

        match (&self.n, &self.e) {
            (Some(n), Some(e)) => {
                DecodingKey::from_rsa_components(n, e).map_err(|err| {
                    KeySetError::CertificateDecode {
                        kid: self.kid.clone(),
                        reason: err.to_string(),
                    }
                })
            }
            _ => Err(KeySetError::MissingKeyMaterial {
                kid: self.kid.clone(),
            }),
        }
    }

    fn decode_certificate(&self, leaf: &str) -> Result<DecodingKey, KeySetError> {
        let fail = |reason: String| KeySetError::CertificateDecode {
            kid: self.kid.clone(),
            reason,
        };

        let der = BASE64_STANDARD
            .decode(leaf.trim())
            .map_err(|err| fail(err.to_string()))?;
        let certificate = X509::from_der(&der).map_err(|err| fail(err.to_string()))?;
        let rsa = certificate
            .public_key()
            .and_then(|key| key.rsa())
            .map_err(|err| fail(err.to_string()))?;

        Ok(DecodingKey::from_rsa_raw_components(
            &rsa.n().to_vec(),
            &rsa.e().to_vec(),
        ))
    }
}
