//! Route definitions for the `/users` resource (admin only).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// PATCH  /{id}        -> update_role
/// DELETE /{id}        -> delete (an admin cannot delete themselves)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}", delete(users::delete).patch(users::update_role))
}
