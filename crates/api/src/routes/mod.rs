pub mod article_categories;
pub mod articles;
pub mod auth;
pub mod health;
pub mod package_types;
pub mod packages;
pub mod public;
pub mod settings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/me                        current user (requires auth)
///
/// /packages                       list, create (requires auth)
/// /packages/{id}                  get, update, delete
///
/// /articles                       list, create (requires auth)
/// /articles/{id}                  get, update, delete
///
/// /package-types                  list, create (requires auth)
/// /package-types/{id}             get, update, delete
///
/// /article-categories             list, create (requires auth)
/// /article-categories/{id}        get, update, delete
///
/// /users                          list, create (admin only)
/// /users/{id}                     patch role, delete
///
/// /settings                       get, update (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/packages", packages::router())
        .nest("/articles", articles::router())
        .nest("/package-types", package_types::router())
        .nest("/article-categories", article_categories::router())
        .nest("/users", users::router())
        .nest("/settings", settings::router())
}
