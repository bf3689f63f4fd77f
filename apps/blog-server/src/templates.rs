//! Tera template loading and rendering.

use actix_web::HttpResponse;
use tera::{Context, Tera};

use crate::middleware::error::AppResult;

/// Load every `.html` template below `dir`.
pub fn load_templates(dir: &str) -> Result<Tera, tera::Error> {
    let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));
    let tera = Tera::new(&glob)?;

    tracing::debug!(
        count = tera.get_template_names().count(),
        dir,
        "Templates loaded"
    );

    Ok(tera)
}

/// Render `name` with `context` into a 200 HTML response.
pub fn render(tera: &Tera, name: &str, context: &Context) -> AppResult<HttpResponse> {
    let body = tera.render(name, context)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
