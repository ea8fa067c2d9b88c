//! Librarium Library Catalog Server
//!
//! A server-rendered catalog application for a small library: authors,
//! books, book copies and genres, with HTML forms for every create,
//! update and delete workflow.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod pages;
pub mod render;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub renderer: Arc<render::Renderer>,
}
