//! Handlers for the `/article-categories` taxonomy resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tripdesk_core::error::CoreError;
use tripdesk_core::types::DbId;
use tripdesk_db::models::article_category::{
    ArticleCategory, ArticleCategoryInput, ArticleCategoryWithCount,
};
use tripdesk_db::repositories::ArticleCategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/article-categories
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ArticleCategoryWithCount>>> {
    let categories = ArticleCategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/article-categories/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ArticleCategory>> {
    let category = ArticleCategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ArticleCategory",
            id,
        }))?;
    Ok(Json(category))
}

/// POST /api/v1/article-categories
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ArticleCategoryInput>,
) -> AppResult<(StatusCode, Json<ArticleCategory>)> {
    validate_name(&input.name)?;
    let category = ArticleCategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        category_id = category.id,
        name = %category.name,
        "Created article category"
    );
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/article-categories/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ArticleCategoryInput>,
) -> AppResult<Json<ArticleCategory>> {
    validate_name(&input.name)?;
    let category = ArticleCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ArticleCategory",
            id,
        }))?;
    tracing::info!(
        user_id = user.user_id,
        category_id = id,
        name = %category.name,
        "Updated article category"
    );
    Ok(Json(category))
}

/// DELETE /api/v1/article-categories/{id}
///
/// Refused with 409 while any article still references the category.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let in_use = ArticleCategoryRepo::article_count(&state.pool, id).await?;
    if in_use > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete category: {in_use} article(s) still use it"
        ))));
    }

    let removed = ArticleCategoryRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ArticleCategory",
            id,
        }));
    }
    tracing::info!(
        user_id = user.user_id,
        category_id = id,
        "Deleted article category"
    );
    Ok(Json(json!({ "success": true })))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'name' must not be empty".into(),
        )));
    }
    Ok(())
}
