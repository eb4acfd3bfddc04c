//! Handlers for the `/package-types` taxonomy resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tripdesk_core::error::CoreError;
use tripdesk_core::types::DbId;
use tripdesk_db::models::package_type::{PackageType, PackageTypeInput, PackageTypeWithCount};
use tripdesk_db::repositories::PackageTypeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/package-types
///
/// Returns every type with its package count so the admin list can show
/// usage and disable deletion of referenced types.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PackageTypeWithCount>>> {
    let types = PackageTypeRepo::list_with_counts(&state.pool).await?;
    Ok(Json(types))
}

/// GET /api/v1/package-types/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PackageType>> {
    let package_type = PackageTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PackageType",
            id,
        }))?;
    Ok(Json(package_type))
}

/// POST /api/v1/package-types
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PackageTypeInput>,
) -> AppResult<(StatusCode, Json<PackageType>)> {
    validate_name(&input.name)?;
    let package_type = PackageTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        type_id = package_type.id,
        name = %package_type.name,
        "Created package type"
    );
    Ok((StatusCode::CREATED, Json(package_type)))
}

/// PUT /api/v1/package-types/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PackageTypeInput>,
) -> AppResult<Json<PackageType>> {
    validate_name(&input.name)?;
    let package_type = PackageTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PackageType",
            id,
        }))?;
    tracing::info!(
        user_id = user.user_id,
        type_id = id,
        name = %package_type.name,
        "Updated package type"
    );
    Ok(Json(package_type))
}

/// DELETE /api/v1/package-types/{id}
///
/// Refused with 409 while any package still references the type.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let in_use = PackageTypeRepo::package_count(&state.pool, id).await?;
    if in_use > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete package type: {in_use} package(s) still use it"
        ))));
    }

    let removed = PackageTypeRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PackageType",
            id,
        }));
    }
    tracing::info!(user_id = user.user_id, type_id = id, "Deleted package type");
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
