//! Home page

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use tera::Context;

use crate::{error::AppResult, AppState};

/// Redirect the site root to the catalog home.
pub async fn root() -> Redirect {
    Redirect::to("/catalog")
}

/// Catalog home page with record counts.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.stats.counts().await?;

    let mut context = Context::new();
    context.insert("title", "Local Library Home");
    context.insert("counts", &counts);
    state.renderer.render("index", &context)
}
