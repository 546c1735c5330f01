//! # bearer-inspect
//!
//! A diagnostic page for `actix-web` that lists the headers of the incoming
//! request and, when an `Authorization: Bearer ...` header is present,
//! verifies the token against the signing keys an OpenID Connect realm
//! publishes at `{idp}/auth/realms/{realm}/protocol/openid-connect/certs`.
//!
//! The key set is fetched fresh for every token; there is no cache. Every
//! outcome (no token, decoded claims, or a classified error) is rendered
//! on a `200 OK` page.
//!
//! ## Example
//!
//! ```no_run
//! use actix_web::{web, App, HttpServer};
//! use bearer_inspect::{jwk::KeySetConfig, server, ScriptNameRewrite, TokenInspector};
//! use url::Url;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let url = Url::parse("https://idp.example.com/auth/realms/demo/protocol/openid-connect/certs").unwrap();
//!     let inspector = web::Data::new(TokenInspector::new(&KeySetConfig::new(url)).unwrap());
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(inspector.clone())
//!             .wrap(ScriptNameRewrite::default())
//!             .configure(server::configure)
//!     })
//!     .bind(("0.0.0.0", 8888))?
//!     .run()
//!     .await
//! }
//! ```

mod config;
mod error;
mod impls;
mod inspector;
pub mod jwk;
pub mod page;
pub mod proxy;
mod request;
pub mod server;

#[cfg(test)]
mod testing;

pub use config::*;
pub use error::*;
pub use inspector::*;
pub use proxy::{ScriptName, ScriptNameRewrite};
pub use request::*;
