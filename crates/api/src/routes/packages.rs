//! Route definitions for the `/packages` admin resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/packages`.
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
        .route("/", get(packages::list).post(packages::create))
        .route(
            "/{id}",
            get(packages::get_by_id)
                .put(packages::update)
                .delete(packages::delete),
        )
}
