//! Reverse-proxy path handling.
//!
//! When the page is published under a sub-path (e.g. `/apps/headers/`), the
//! proxy forwards the full path and announces the prefix in a script-name
//! header. [`rewrite_path`] computes the routed path from those two values and
//! [`ScriptNameRewrite`] applies it ahead of routing.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::HeaderName;
use actix_web::http::uri::{PathAndQuery, Uri};
use actix_web::{Error, HttpMessage};
use futures::future::{ok, Ready};
use tracing::debug;

/// Default header carrying the proxy's mount prefix.
pub const DEFAULT_SCRIPT_NAME_HEADER: &str = "x-script-name";

/// Result of applying a script name to a request path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxiedPath {
    /// Mount prefix, without a trailing slash.
    pub script_name: Option<String>,
    /// Path used for routing.
    pub path: String,
}

/// Mount prefix recorded in request extensions by [`ScriptNameRewrite`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptName(pub String);

/// Strips `script_name` from the front of `path`.
///
/// The prefix only matches on a segment boundary, and a fully consumed path
/// becomes `/`. A prefix that does not match leaves the path untouched but is
/// still reported as the mount point.
pub fn rewrite_path(path: &str, script_name: Option<&str>) -> ProxiedPath {
    let prefix = script_name.map_or("", |s| s.trim().trim_end_matches('/'));
    if prefix.is_empty() {
        return ProxiedPath {
            script_name: None,
            path: path.to_owned(),
        };
    }

    let path = match path.strip_prefix(prefix) {
        Some("") => "/".to_owned(),
        Some(rest) if rest.starts_with('/') => rest.to_owned(),
        _ => path.to_owned(),
    };

    ProxiedPath {
        script_name: Some(prefix.to_owned()),
        path,
    }
}

/// Middleware factory applying [`rewrite_path`] to every request.
#[derive(Clone, Debug)]
pub struct ScriptNameRewrite {
    header: HeaderName,
}

impl ScriptNameRewrite {
    /// Reads the prefix from `header`.
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for ScriptNameRewrite {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_SCRIPT_NAME_HEADER))
    }
}

impl<S, B> Transform<S, ServiceRequest> for ScriptNameRewrite
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ScriptNameRewriteMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ScriptNameRewriteMiddleware {
            service,
            header: self.header.clone(),
        })
    }
}

/// Service produced by [`ScriptNameRewrite`].
pub struct ScriptNameRewriteMiddleware<S> {
    service: S,
    header: HeaderName,
}

impl<S, B> Service<ServiceRequest> for ScriptNameRewriteMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let script_name = req
            .headers()
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let rewritten = rewrite_path(req.path(), script_name.as_deref());

        if let Some(prefix) = rewritten.script_name {
            if rewritten.path != req.path() {
                let head = req.head();
                let path_and_query = match head.uri.query() {
                    Some(query) => format!("{}?{}", rewritten.path, query),
                    None => rewritten.path,
                };

                let mut parts = head.uri.clone().into_parts();
                parts.path_and_query = PathAndQuery::try_from(path_and_query).ok();

                if let Ok(uri) = Uri::from_parts(parts) {
                    debug!(%prefix, path = %uri.path(), "Stripped script name");
                    req.match_info_mut().get_mut().update(&uri);
                    req.head_mut().uri = uri;
                }
            }

            req.extensions_mut().insert(ScriptName(prefix));
        }

        self.service.call(req)
    }
}
