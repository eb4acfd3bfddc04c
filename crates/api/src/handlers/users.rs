//! Handlers for the `/users` resource. Every operation requires the admin
//! role; an admin cannot delete their own account.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tripdesk_core::error::CoreError;
use tripdesk_core::roles::{validate_role, ROLE_USER};
use tripdesk_core::types::DbId;
use tripdesk_db::models::user::{CreateUser, UpdateUserRole, User};
use tripdesk_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// JSON body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to the regular `user` role.
    pub role: Option<String>,
}

/// GET /api/v1/users
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'name' must not be empty".into(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'email' must be a valid email address".into(),
        )));
    }
    if input.password.len() < 8 {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'password' must be at least 8 characters".into(),
        )));
    }
    let role = input.role.unwrap_or_else(|| ROLE_USER.to_string());
    validate_role(&role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(
        user_id = admin.user_id,
        created_user_id = user.id,
        role = %user.role,
        "Created user"
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /api/v1/users/{id}
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRole>,
) -> AppResult<Json<User>> {
    validate_role(&input.role)?;
    let user = UserRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(
        user_id = admin.user_id,
        target_user_id = id,
        role = %user.role,
        "Updated user role"
    );
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    if admin.user_id == id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }

    let removed = UserRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = admin.user_id, target_user_id = id, "Deleted user");
    Ok(Json(json!({ "success": true })))
}
