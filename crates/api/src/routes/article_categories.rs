//! Route definitions for the `/article-categories` taxonomy.

use axum::routing::get;
use axum::Router;

use crate::handlers::article_categories;
use crate::state::AppState;

/// Routes mounted at `/article-categories`.
///
/// ```text
/// GET    /            -> list (with article counts)
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete (409 while referenced)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(article_categories::list).post(article_categories::create),
        )
        .route(
            "/{id}",
            get(article_categories::get_by_id)
                .put(article_categories::update)
                .delete(article_categories::delete),
        )
}
