//! The `GET /` page and the server that hosts it.

use actix_web::http::header::ContentType;
use actix_web::{get, web, App, HttpResponse, HttpServer};
use tracing::info;

use crate::config::Config;
use crate::inspector::TokenInspector;
use crate::page;
use crate::proxy::ScriptNameRewrite;
use crate::request::RequestContext;

/// Shows the request headers and the outcome of verifying its bearer token.
///
/// Always answers `200 OK`; failures are part of the page.
#[get("/")]
async fn index(ctx: RequestContext, inspector: web::Data<TokenInspector>) -> HttpResponse {
    let outcome = inspector.inspect(ctx.token()).await;

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::render(&ctx, &outcome))
}

/// Registers the page's routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}

/// Binds the configured address and serves until shutdown.
pub async fn run(config: &Config) -> crate::Result<()> {
    let key_set = config.key_set_config()?;
    let inspector = web::Data::new(TokenInspector::new(&key_set)?);
    let rewrite = ScriptNameRewrite::new(config.script_name_header()?);

    info!(
        host = %config.host,
        port = config.port,
        jwks_url = %key_set.jwks_url(),
        audience = key_set.audience(),
        "Starting bearer token inspector"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(inspector.clone())
            .wrap(rewrite.clone())
            .configure(configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
