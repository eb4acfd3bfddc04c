//! Route definitions for the `/package-types` taxonomy.

use axum::routing::get;
use axum::Router;

use crate::handlers::package_types;
use crate::state::AppState;

/// Routes mounted at `/package-types`.
///
/// ```text
/// GET    /            -> list (with package counts)
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete (409 while referenced)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(package_types::list).post(package_types::create))
        .route(
            "/{id}",
            get(package_types::get_by_id)
                .put(package_types::update)
                .delete(package_types::delete),
        )
}
