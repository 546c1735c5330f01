use actix_web::{dev, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ok, Ready};
use tracing::debug;

use crate::proxy::ScriptName;
use crate::RequestContext;

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let mount_path = req
            .extensions()
            .get::<ScriptName>()
            .map(|ScriptName(prefix)| prefix.clone());

        let ctx = RequestContext::from_header_map(req.headers()).with_mount_path(mount_path);

        for (name, value) in ctx.headers() {
            debug!(%name, %value, "Request header");
        }

        ok(ctx)
    }
}
