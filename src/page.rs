//! HTML rendering of a request's headers and token outcome.

use minijinja::{context, Environment};
use tracing::error;

use crate::inspector::Outcome;
use crate::request::RequestContext;

/// Page template loaded at compile time. The `.html` name turns on
/// auto-escaping for every interpolated value.
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
const PAGE_TEMPLATE_NAME: &str = "page.html";

/// Shown instead of the page if the template itself is broken.
const FALLBACK_PAGE: &str =
    "<!DOCTYPE html>\n<html><body><p>The inspection page could not be rendered.</p></body></html>\n";

/// Renders the full page. Every combination of token and outcome is valid.
pub fn render(ctx: &RequestContext, outcome: &Outcome) -> String {
    render_template(ctx, outcome).unwrap_or_else(|err| {
        error!("Failed to render inspection page: {err:#}");
        FALLBACK_PAGE.to_owned()
    })
}

fn render_template(ctx: &RequestContext, outcome: &Outcome) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;

    let claims = outcome.claims().map(|claims| {
        serde_json::to_string_pretty(claims).unwrap_or_else(|_| format!("{claims:?}"))
    });
    let error = outcome.error().map(ToString::to_string);

    env.get_template(PAGE_TEMPLATE_NAME)?.render(context! {
        mount_path => ctx.mount_path(),
        headers => ctx.headers(),
        token => ctx.token(),
        claims => claims,
        error => error,
    })
}
