use std::time::{SystemTime, UNIX_EPOCH};

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use super::config::KeySetConfig;
use super::error::{VerificationError, VerificationResult};

/// Decoded token payload, in the order the issuer wrote it.
pub type Claims = Map<String, Value>;

/// RSA PKCS#1 signatures accepted on inspected tokens.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Checks a token against an already resolved public key.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    audience: String,
    leeway: u64,
}

impl TokenVerifier {
    /// Builds a verifier for the configured audience and leeway.
    pub fn new(config: &KeySetConfig) -> TokenVerifier {
        TokenVerifier {
            audience: config.audience().to_owned(),
            leeway: config.leeway(),
        }
    }

    /// Returns the token's claims when it is unexpired, correctly signed by
    /// `key` and addressed to the configured audience.
    pub fn verify(&self, token: &str, key: &DecodingKey) -> VerificationResult<Claims> {
        // Expiry is reported even when the signature would also fail.
        let unverified = peek_claims(token)?;
        if self.is_expired(&unverified) {
            return Err(VerificationError::TokenExpired);
        }

        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "aud"]);
        validation.leeway = self.leeway;

        let claims = jsonwebtoken::decode::<Claims>(token, key, &validation)?.claims;
        Ok(claims)
    }

    // NumericDate may carry a fractional part.
    #[expect(clippy::cast_precision_loss)]
    fn is_expired(&self, claims: &Claims) -> bool {
        let Some(exp) = claims.get("exp").and_then(Value::as_f64) else {
            return false;
        };

        exp + (self.leeway as f64) < now_as_secs() as f64
    }
}

/// Decodes the payload segment without checking the signature.
fn peek_claims(token: &str) -> VerificationResult<Claims> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(VerificationError::InvalidToken(
            "expected three dot-separated segments".into(),
        ));
    };

    let decoded = BASE64_URL_SAFE_NO_PAD
        .decode(payload.trim())
        .map_err(|err| VerificationError::InvalidToken(err.to_string()))?;

    serde_json::from_slice(&decoded)
        .map_err(|err| VerificationError::InvalidToken(err.to_string()))
}

fn now_as_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
