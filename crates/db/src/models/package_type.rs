//! Package type (taxonomy) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripdesk_core::types::{DbId, Timestamp};

/// A row from the `package_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackageType {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A package type with the number of packages referencing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackageTypeWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub package_type: PackageType,
    pub package_count: i64,
}

/// JSON body for creating or updating a package type.
#[derive(Debug, Deserialize)]
pub struct PackageTypeInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
