//! Book instance pages

use axum::{
    extract::{Path, RawForm, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::FormData,
    models::{BookInstance, BookSummary, InstanceSummary, LoanStatus},
    services::instances::{InstanceFormView, InstanceOutcome},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let instances = state.services.instances.list().await?;

    let mut context = Context::new();
    context.insert("title", "Book Instance List");
    context.insert(
        "instances",
        &instances.iter().map(InstanceSummary::view).collect::<Vec<_>>(),
    );
    Ok(state
        .renderer
        .render("bookinstance_list", &context)?
        .into_response())
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let instance = state.services.instances.get(id).await?;

    let mut context = Context::new();
    context.insert("title", "Book Instance Detail");
    context.insert("instance", &instance.view());
    Ok(state
        .renderer
        .render("bookinstance_detail", &context)?
        .into_response())
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.services.instances.form_books().await?;
    let view = InstanceFormView {
        instance: BookInstance::default(),
        books,
        errors: Vec::new(),
    };
    Ok(render_form(&state, "Create Book Instance", &view)?.into_response())
}

pub async fn create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.instances.create(&form).await? {
        InstanceOutcome::Saved { id } => {
            Ok(Redirect::to(&BookInstance::url_for(id)).into_response())
        }
        InstanceOutcome::Invalid(view) => {
            Ok(render_form(&state, "Create Book Instance", &view)?.into_response())
        }
    }
}

pub async fn update_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let (instance, books) = tokio::try_join!(
        state.services.instances.get(id),
        state.services.instances.form_books(),
    )?;
    let view = InstanceFormView {
        instance,
        books,
        errors: Vec::new(),
    };
    Ok(render_form(&state, "Update Book Instance", &view)?.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.instances.update(id, &form).await? {
        InstanceOutcome::Saved { id } => {
            Ok(Redirect::to(&BookInstance::url_for(id)).into_response())
        }
        InstanceOutcome::Invalid(view) => {
            Ok(render_form(&state, "Update Book Instance", &view)?.into_response())
        }
    }
}

pub async fn delete_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let instance = state.services.instances.get(id).await?;

    let mut context = Context::new();
    context.insert("title", "Delete Book Instance");
    context.insert("instance", &instance.view());
    Ok(state
        .renderer
        .render("bookinstance_delete", &context)?
        .into_response())
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    state.services.instances.delete(id).await?;
    Ok(Redirect::to("/catalog/bookinstances").into_response())
}

fn render_form(state: &AppState, title: &str, view: &InstanceFormView) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("instance", &view.instance.view());
    context.insert(
        "books",
        &view.books.iter().map(BookSummary::view).collect::<Vec<_>>(),
    );
    context.insert("statuses", &LoanStatus::ALL);
    context.insert("errors", &view.errors);
    state.renderer.render("bookinstance_form", &context)
}
