use tracing::{debug, info};

use crate::jwk::{Claims, KeyResolver, KeySetConfig, TokenVerifier, VerificationError};

/// What the page shows about the request's bearer token.
#[derive(Debug)]
pub enum Outcome {
    /// No `Authorization: Bearer ...` header was sent.
    NoToken,
    /// The token verified; its claims are shown unchanged.
    Verified(Claims),
    /// Resolution or verification failed.
    Failed(VerificationError),
}

impl Outcome {
    /// Claims, when verification succeeded.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Outcome::Verified(claims) => Some(claims),
            _ => None,
        }
    }

    /// Error, when verification failed.
    pub fn error(&self) -> Option<&VerificationError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Resolves the signing key and verifies bearer tokens against it.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Debug, Clone)]
pub struct TokenInspector {
    resolver: KeyResolver,
    verifier: TokenVerifier,
}

impl TokenInspector {
    /// Creates an inspector for the given realm settings.
    pub fn new(config: &KeySetConfig) -> crate::Result<Self> {
        let resolver = KeyResolver::new(config).map_err(crate::Error::HttpClient)?;
        let verifier = TokenVerifier::new(config);

        Ok(Self { resolver, verifier })
    }

    /// Fetches the current key set and verifies `token` against it.
    pub async fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        let key = self.resolver.resolve(token).await?;
        self.verifier.verify(token, &key)
    }

    /// Verifies the token if one was sent; no token means no key-set fetch.
    pub async fn inspect(&self, token: Option<&str>) -> Outcome {
        let Some(token) = token else {
            debug!("No bearer token on request");
            return Outcome::NoToken;
        };

        match self.verify(token).await {
            Ok(claims) => {
                info!(sub = ?claims.get("sub"), "Bearer token verified");
                Outcome::Verified(claims)
            }
            Err(err) => {
                info!("Bearer token rejected: {err}");
                Outcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_set, now_as_secs, valid_claims, TestKey};
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::Value;
    use url::Url;

    fn inspector_for(server: &MockServer) -> TokenInspector {
        let url = Url::parse(&server.url("/certs")).unwrap();
        TokenInspector::new(&KeySetConfig::new(url)).unwrap()
    }

    #[actix_rt::test]
    async fn no_token_skips_key_set() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/certs");
                then.status(200)
                    .json_body(key_set(&[TestKey::primary().jwk("kid-1")]));
            })
            .await;

        let outcome = inspector_for(&server).inspect(None).await;
        assert!(matches!(outcome, Outcome::NoToken));
        assert!(outcome.claims().is_none() && outcome.error().is_none());
        mock.assert_hits_async(0).await;
    }

    #[actix_rt::test]
    async fn verified_claims_match_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/certs");
                then.status(200)
                    .json_body(key_set(&[TestKey::primary().jwk("kid-1")]));
            })
            .await;

        let payload = valid_claims();
        let token = TestKey::primary().sign(&payload, Some("kid-1"));

        let outcome = inspector_for(&server).inspect(Some(&token)).await;
        let claims = outcome.claims().cloned().expect("token should verify");
        assert_eq!(Value::Object(claims), payload);
        assert!(outcome.error().is_none());
    }

    #[actix_rt::test]
    async fn expired_token_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/certs");
                then.status(200)
                    .json_body(key_set(&[TestKey::primary().jwk("kid-1")]));
            })
            .await;

        let mut payload = valid_claims();
        payload["exp"] = (now_as_secs() - 3600).into();
        let token = TestKey::primary().sign(&payload, Some("kid-1"));

        let outcome = inspector_for(&server).inspect(Some(&token)).await;
        assert!(matches!(
            outcome,
            Outcome::Failed(VerificationError::TokenExpired)
        ));
        assert!(outcome.claims().is_none());
    }

    #[actix_rt::test]
    async fn every_request_fetches_fresh_keys() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/certs");
                then.status(200)
                    .json_body(key_set(&[TestKey::primary().jwk("kid-1")]));
            })
            .await;

        let inspector = inspector_for(&server);
        let token = TestKey::primary().sign(&valid_claims(), Some("kid-1"));
        assert!(inspector.verify(&token).await.is_ok());
        assert!(inspector.verify(&token).await.is_ok());
        mock.assert_hits_async(2).await;
    }
}
