//! View rendering.
//!
//! Views are addressed by symbolic name; the handlers build a
//! [`tera::Context`] payload and never touch template paths.

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppResult;

/// Template engine wrapper
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Load templates matching the configured glob.
    pub fn new(glob: &str) -> anyhow::Result<Self> {
        let tera = Tera::new(glob)?;
        Ok(Self { tera })
    }

    /// Render a view by name with the given payload.
    pub fn render(&self, view: &str, context: &Context) -> AppResult<Html<String>> {
        let body = self.tera.render(&format!("{}.html", view), context)?;
        Ok(Html(body))
    }
}
