//! Server-rendered form and its embedded static assets.

use std::borrow::Cow;

use anyhow::Context;
use axum::Router;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use calckit::api::{RequestMeta, not_found};
use calculator_sdk::Operation;
use http::{Uri, header};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Mount `/` and the `/js` and `/css` asset routes.
///
/// # Errors
/// Fails if the page cannot be rendered.
pub fn register_routes(router: Router, title: &str) -> anyhow::Result<Router> {
    let page = render_index(title).context("failed to render calculator page")?;

    Ok(router
        .route(
            "/",
            get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        .route("/js/{*file}", get(serve_asset))
        .route("/css/{*file}", get(serve_asset)))
}

/// Fill the page template with the title and one `<option>` per operation.
///
/// # Errors
/// Fails if the template lost one of its placeholders.
pub fn render_index(title: &str) -> anyhow::Result<String> {
    for placeholder in ["{{title}}", "{{operations}}"] {
        anyhow::ensure!(
            INDEX_TEMPLATE.contains(placeholder),
            "page template has no {placeholder} placeholder"
        );
    }

    let options = Operation::ALL
        .into_iter()
        .map(render_option)
        .collect::<Vec<_>>()
        .join("\n            ");

    Ok(INDEX_TEMPLATE
        .replace("{{title}}", &escape_html(title))
        .replace("{{operations}}", &options))
}

/// One `<option>` carrying the operation's arity and input hints as
/// `data-*` attributes; the form script reads them on selection.
fn render_option(op: Operation) -> String {
    let hints = op.input_hints();
    let mut attrs = format!(
        r#"value="{}" data-arity="{}" data-a-label="{}" data-a-placeholder="{}""#,
        op.as_str(),
        op.arity(),
        escape_html(hints.a_label),
        escape_html(hints.a_placeholder),
    );
    if let Some((label, placeholder)) = hints.b {
        attrs.push_str(&format!(
            r#" data-b-label="{}" data-b-placeholder="{}""#,
            escape_html(label),
            escape_html(placeholder),
        ));
    }
    format!("<option {attrs}>{}</option>", escape_html(op.label()))
}

async fn serve_asset(meta: RequestMeta, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match Assets::get(path) {
        Some(file) => {
            let body: Cow<'static, [u8]> = file.data;
            ([(header::CONTENT_TYPE, content_type(path))], body).into_response()
        }
        None => {
            tracing::debug!(path, "Unknown asset requested");
            meta.finalize(not_found(format!("No asset at /{path}")))
                .into_response()
        }
    }
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
