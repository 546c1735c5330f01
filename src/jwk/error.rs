use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

pub(crate) type VerificationResult<T> = std::result::Result<T, VerificationError>;

/// Classified reasons a bearer token could not be turned into claims.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The signature does not match the resolved public key.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The `exp` claim lies in the past.
    #[error("Token has expired")]
    TokenExpired,

    /// Malformed structure, audience mismatch or unsupported algorithm.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token header carries no `kid`.
    #[error("Missing 'kid' header in token")]
    MissingKeyId,

    /// The key set has no entry for the token's `kid`.
    #[error("No signing key published for kid '{0}'")]
    UnknownKeyId(String),

    /// The key set could not be fetched, parsed or decoded.
    #[error("Signing keys unavailable: {0}")]
    KeySetUnavailable(#[from] KeySetError),
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => VerificationError::InvalidSignature,
            ErrorKind::ExpiredSignature => VerificationError::TokenExpired,
            _ => VerificationError::InvalidToken(err.to_string()),
        }
    }
}

/// Errors raised while obtaining a usable public key from the key set.
#[derive(Debug, Error)]
pub enum KeySetError {
    /// Transport failure, timeout or non-success status.
    #[error("failed to fetch signing keys from the identity provider: {0}")]
    FetchKeySet(reqwest::Error),

    /// The response body is not a key set.
    #[error("failed to parse signing keys: {0}")]
    KeySetParseError(reqwest::Error),

    /// The matching entry has nothing to build a key from.
    #[error("key '{kid}' carries neither an 'x5c' certificate nor RSA components")]
    MissingKeyMaterial {
        /// Identifier of the offending entry.
        kid: String,
    },

    /// The certificate or RSA components are unusable.
    #[error("certificate for key '{kid}' could not be decoded: {reason}")]
    CertificateDecode {
        /// Identifier of the offending entry.
        kid: String,
        /// What openssl or the base64 decoder reported.
        reason: String,
    },
}
