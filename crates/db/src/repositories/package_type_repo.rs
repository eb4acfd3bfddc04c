//! Repository for the `package_types` table.

use sqlx::PgPool;
use tripdesk_core::types::DbId;

use crate::models::package_type::{PackageType, PackageTypeInput, PackageTypeWithCount};

/// Column list for package_types queries.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for package types.
pub struct PackageTypeRepo;

impl PackageTypeRepo {
    /// List all package types with their package counts, newest first.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<PackageTypeWithCount>, sqlx::Error> {
        sqlx::query_as::<_, PackageTypeWithCount>(
            "SELECT t.id, t.name, t.description, t.created_at, t.updated_at,
                    COUNT(p.id) AS package_count
             FROM package_types t
             LEFT JOIN travel_packages p ON p.type_id = t.id
             GROUP BY t.id
             ORDER BY t.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a package type by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PackageType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM package_types WHERE id = $1");
        sqlx::query_as::<_, PackageType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a package type.
    pub async fn create(pool: &PgPool, input: &PackageTypeInput) -> Result<PackageType, sqlx::Error> {
        let query = format!(
            "INSERT INTO package_types (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PackageType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update a package type. Returns `None` when it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PackageTypeInput,
    ) -> Result<Option<PackageType>, sqlx::Error> {
        let query = format!(
            "UPDATE package_types SET name = $1, description = $2, updated_at = NOW()
             WHERE id = $3 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PackageType>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count packages referencing a type. Deleting a referenced type must be
    /// refused before reaching the FK constraint.
    pub async fn package_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM travel_packages WHERE type_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a package type. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM package_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
