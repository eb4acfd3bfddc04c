//! Route definitions for the unauthenticated storefront.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public` (no authentication).
///
/// ```text
/// GET /status             -> status (branding + maintenance flag)
/// GET /packages           -> packages (ACTIVE only)
/// GET /packages/{slug}    -> package_by_slug
/// GET /articles           -> articles (published only)
/// GET /articles/{slug}    -> article_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(public::status))
        .route("/packages", get(public::packages))
        .route("/packages/{slug}", get(public::package_by_slug))
        .route("/articles", get(public::articles))
        .route("/articles/{slug}", get(public::article_by_slug))
}
