//! Author pages

use axum::{
    extract::{Path, RawForm, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{FieldFailure, FormData},
    models::{Author, Book},
    services::authors::{AuthorDelete, AuthorOutcome},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;

    let mut context = Context::new();
    context.insert("title", "Author List");
    context.insert(
        "authors",
        &authors.iter().map(Author::view).collect::<Vec<_>>(),
    );
    Ok(state.renderer.render("author_list", &context)?.into_response())
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let (author, books) = state.services.authors.detail(id).await?;

    let mut context = Context::new();
    context.insert("title", "Author Detail");
    context.insert("author", &author.view());
    context.insert("books", &books.iter().map(Book::view).collect::<Vec<_>>());
    Ok(state
        .renderer
        .render("author_detail", &context)?
        .into_response())
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    Ok(render_form(&state, "Create Author", &Author::default(), &[])?.into_response())
}

pub async fn create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.authors.create(&form).await? {
        AuthorOutcome::Saved { id } => Ok(Redirect::to(&Author::url_for(id)).into_response()),
        AuthorOutcome::Invalid { author, errors } => {
            Ok(render_form(&state, "Create Author", &author, &errors)?.into_response())
        }
    }
}

pub async fn update_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let author = state.services.authors.get(id).await?;
    Ok(render_form(&state, "Update Author", &author, &[])?.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.authors.update(id, &form).await? {
        AuthorOutcome::Saved { id } => Ok(Redirect::to(&Author::url_for(id)).into_response()),
        AuthorOutcome::Invalid { author, errors } => {
            Ok(render_form(&state, "Update Author", &author, &errors)?.into_response())
        }
    }
}

pub async fn delete_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let (author, books) = state.services.authors.detail(id).await?;
    Ok(render_delete(&state, &author, &books)?.into_response())
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.authors.delete(id).await? {
        AuthorDelete::Deleted => Ok(Redirect::to("/catalog/authors").into_response()),
        AuthorDelete::Blocked { author, books } => {
            Ok(render_delete(&state, &author, &books)?.into_response())
        }
    }
}

fn render_form(
    state: &AppState,
    title: &str,
    author: &Author,
    errors: &[FieldFailure],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", &author.view());
    context.insert("errors", errors);
    state.renderer.render("author_form", &context)
}

fn render_delete(state: &AppState, author: &Author, books: &[Book]) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Delete Author");
    context.insert("author", &author.view());
    context.insert("books", &books.iter().map(Book::view).collect::<Vec<_>>());
    state.renderer.render("author_delete", &context)
}
