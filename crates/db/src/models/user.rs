//! Back-office user models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripdesk_core::types::{DbId, Timestamp};

/// A row from the `users` table. The password hash never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user (admin seeding and tests).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// JSON body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRole {
    pub role: String,
}
