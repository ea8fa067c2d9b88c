//! Book pages

use axum::{
    extract::{Path, RawForm, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::FormData,
    models::{Author, Book, BookInstance, BookSummary, Genre},
    services::books::{BookDelete, BookFormView, BookOutcome},
    AppState,
};

pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.services.books.list().await?;

    let mut context = Context::new();
    context.insert("title", "Book List");
    context.insert(
        "books",
        &books.iter().map(BookSummary::view).collect::<Vec<_>>(),
    );
    Ok(state.renderer.render("book_list", &context)?.into_response())
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let (book, instances) = state.services.books.detail(id).await?;

    let mut context = Context::new();
    context.insert("title", "Book Detail");
    context.insert("book", &book.view());
    context.insert(
        "instances",
        &instances.iter().map(BookInstance::view).collect::<Vec<_>>(),
    );
    Ok(state.renderer.render("book_detail", &context)?.into_response())
}

pub async fn create_get(State(state): State<AppState>) -> AppResult<Response> {
    let (authors, genres) = state.services.books.form_lists().await?;
    let view = BookFormView {
        book: Book::default(),
        genre_ids: Vec::new(),
        authors,
        genres,
        errors: Vec::new(),
    };
    Ok(render_form(&state, "Create Book", &view)?.into_response())
}

pub async fn create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.books.create(&form).await? {
        BookOutcome::Saved { id } => Ok(Redirect::to(&Book::url_for(id)).into_response()),
        BookOutcome::Invalid(view) => {
            Ok(render_form(&state, "Create Book", &view)?.into_response())
        }
    }
}

pub async fn update_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let view = state.services.books.form_view(id).await?;
    Ok(render_form(&state, "Update Book", &view)?.into_response())
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawForm(body): RawForm,
) -> AppResult<Response> {
    let form = FormData::parse(&body)?;
    match state.services.books.update(id, &form).await? {
        BookOutcome::Saved { id } => Ok(Redirect::to(&Book::url_for(id)).into_response()),
        BookOutcome::Invalid(view) => {
            Ok(render_form(&state, "Update Book", &view)?.into_response())
        }
    }
}

pub async fn delete_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Response> {
    let (book, instances) = state.services.books.detail(id).await?;
    Ok(render_delete(&state, &book, &instances)?.into_response())
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    match state.services.books.delete(id).await? {
        BookDelete::Deleted => Ok(Redirect::to("/catalog/books").into_response()),
        BookDelete::Blocked { book, instances } => {
            Ok(render_delete(&state, &book, &instances)?.into_response())
        }
    }
}

fn render_form(state: &AppState, title: &str, view: &BookFormView) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("book", &view.book.view());
    context.insert("genre_ids", &view.genre_ids);
    context.insert(
        "authors",
        &view.authors.iter().map(Author::view).collect::<Vec<_>>(),
    );
    context.insert(
        "genres",
        &view.genres.iter().map(Genre::view).collect::<Vec<_>>(),
    );
    context.insert("errors", &view.errors);
    state.renderer.render("book_form", &context)
}

fn render_delete(
    state: &AppState,
    book: &Book,
    instances: &[BookInstance],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Delete Book");
    context.insert("book", &book.view());
    context.insert(
        "instances",
        &instances.iter().map(BookInstance::view).collect::<Vec<_>>(),
    );
    state.renderer.render("book_delete", &context)
}
