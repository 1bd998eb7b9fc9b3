pub mod health;
pub mod resource;

use axum::routing::get;
use axum::Router;
use dunno_db::models::book::Book;
use dunno_db::models::news::News;
use dunno_db::models::note::Note;

use crate::handlers;
use crate::state::AppState;

/// Build the page route tree.
///
/// ```text
/// /                         landing page
/// /Books/...                book CRUD pages (with search)
/// /News/...                 news CRUD pages
/// /Notes/...                note CRUD pages
/// ```
///
/// See [`resource::router`] for the per-resource routes.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::index))
        .merge(resource::router::<Book>())
        .merge(resource::router::<News>())
        .merge(resource::router::<Note>())
}
