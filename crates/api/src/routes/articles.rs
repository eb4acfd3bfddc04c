//! Route definitions for the `/articles` admin resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /            -> list (paged, filtered, sorted)
/// POST   /            -> create (multipart)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update (multipart)
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route(
            "/{id}",
            get(articles::get_by_id)
                .put(articles::update)
                .delete(articles::delete),
        )
}
