/// A crate-wide result type alias using the custom [`Error`] enum.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for setting up and serving the inspection page.
///
/// Per-request verification failures are not raised through this type; they
/// are rendered on the page as a [`crate::jwk::VerificationError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identity provider host cannot carry the realm's certs path.
    #[error("identity provider host '{0}' cannot be used as a base URL")]
    InvalidIdpHost(url::Url),

    /// The script-name header option is not a valid header name.
    #[error("'{0}' is not a valid HTTP header name")]
    InvalidHeaderName(String),

    /// The HTTP client used for key-set fetches could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    /// Binding or running the HTTP server failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
