//! Repository for the `article_categories` table.

use sqlx::PgPool;
use tripdesk_core::types::DbId;

use crate::models::article_category::{
    ArticleCategory, ArticleCategoryInput, ArticleCategoryWithCount,
};

/// Column list for article_categories queries.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for article categories.
pub struct ArticleCategoryRepo;

impl ArticleCategoryRepo {
    /// List all categories with their article counts, newest first.
    pub async fn list_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<ArticleCategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, ArticleCategoryWithCount>(
            "SELECT c.id, c.name, c.description, c.created_at, c.updated_at,
                    COUNT(a.id) AS article_count
             FROM article_categories c
             LEFT JOIN articles a ON a.category_id = c.id
             GROUP BY c.id
             ORDER BY c.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a category by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArticleCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM article_categories WHERE id = $1");
        sqlx::query_as::<_, ArticleCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a category.
    pub async fn create(
        pool: &PgPool,
        input: &ArticleCategoryInput,
    ) -> Result<ArticleCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO article_categories (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update a category. Returns `None` when it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ArticleCategoryInput,
    ) -> Result<Option<ArticleCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE article_categories SET name = $1, description = $2, updated_at = NOW()
             WHERE id = $3 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count articles referencing a category.
    pub async fn article_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE category_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a category. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM article_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
