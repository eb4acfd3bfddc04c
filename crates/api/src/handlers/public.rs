//! Unauthenticated storefront handlers under `/public`.
//!
//! These expose only published content: ACTIVE packages and published
//! articles, looked up by slug. `/public/status` carries the maintenance
//! flag and branding so the storefront can render its shell before any
//! authenticated call.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tripdesk_db::models::article::ArticleWithCategory;
use tripdesk_db::models::package::{PackageDetail, PackageWithType};
use tripdesk_db::repositories::{ArticleRepo, PackageRepo, SettingsRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Branding + maintenance state for the storefront shell.
#[derive(Debug, Serialize)]
pub struct SiteStatus {
    pub site_name: Option<String>,
    pub logo: Option<String>,
    pub is_online: bool,
}

/// GET /public/status
///
/// An unwritten settings row reads as an online site with no branding.
pub async fn status(State(state): State<AppState>) -> AppResult<Json<SiteStatus>> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(match settings {
        Some(s) => SiteStatus {
            site_name: Some(s.site_name),
            logo: s.logo,
            is_online: s.is_online,
        },
        None => SiteStatus {
            site_name: None,
            logo: None,
            is_online: true,
        },
    }))
}

/// GET /public/packages
pub async fn packages(State(state): State<AppState>) -> AppResult<Json<Vec<PackageWithType>>> {
    let packages = PackageRepo::list_active(&state.pool).await?;
    Ok(Json(packages))
}

/// GET /public/packages/{slug}
pub async fn package_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PackageDetail>> {
    let detail = PackageRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("Package", &slug))?;
    Ok(Json(detail))
}

/// GET /public/articles
pub async fn articles(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleWithCategory>>> {
    let articles = ArticleRepo::list_published(&state.pool).await?;
    Ok(Json(articles))
}

/// GET /public/articles/{slug}
pub async fn article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ArticleWithCategory>> {
    let article = ArticleRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("Article", &slug))?;
    Ok(Json(article))
}

/// Slug lookups have no numeric id, so the 404 carries the slug instead.
fn not_found(entity: &str, slug: &str) -> AppError {
    AppError::NotFound(format!("{entity} with slug '{slug}' not found"))
}
