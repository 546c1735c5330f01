use actix_web::http::header::HeaderMap;

/// Literal, case-sensitive scheme prefix of a bearer credential.
const BEARER_PREFIX: &str = "Bearer ";

/// Per-request view of the headers and the bearer token they carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    headers: Vec<(String, String)>,
    token: Option<String>,
    mount_path: Option<String>,
}

impl RequestContext {
    /// Builds a context from header pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();

        let token = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .and_then(|(_, value)| bearer_token(value))
            .map(str::to_owned);

        Self {
            headers,
            token,
            mount_path: None,
        }
    }

    /// Builds a context from actix's header map.
    ///
    /// `HeaderMap` does not keep wire order, so headers are sorted by name to
    /// give a stable listing. Repeated headers keep one entry per value.
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut pairs: Vec<(String, String)> = map
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        Self::from_pairs(pairs)
    }

    /// Records the path prefix the reverse proxy mounted the app under.
    #[must_use]
    pub fn with_mount_path(mut self, mount_path: Option<String>) -> Self {
        self.mount_path = mount_path;
        self
    }

    /// All headers as (name, value) pairs.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the header called `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The bearer token, if the request carried one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Path prefix stripped by the reverse-proxy stage.
    pub fn mount_path(&self) -> Option<&str> {
        self.mount_path.as_deref()
    }
}

/// Returns everything after a literal `"Bearer "` prefix.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization.strip_prefix(BEARER_PREFIX)
}
