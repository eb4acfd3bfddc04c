//! Repository for the `articles` table.

use sqlx::PgPool;
use tripdesk_core::listing::SortDirection;
use tripdesk_core::types::DbId;

use crate::models::article::{Article, ArticleFilter, ArticleInput, ArticleWithCategory};

/// Column list for articles queries.
const COLUMNS: &str = "id, title, slug, content, excerpt, image_url, published, \
    category_id, created_at, updated_at";

/// Column list qualified with the `a` alias for joined queries.
const A_COLUMNS: &str = "a.id, a.title, a.slug, a.content, a.excerpt, a.image_url, \
    a.published, a.category_id, a.created_at, a.updated_at";

/// Shared predicate for list/count queries. Bind order: $1 search pattern,
/// $2 category id, $3 published; a NULL bind disables its condition.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR a.title ILIKE $1 OR a.excerpt ILIKE $1) \
     AND ($2::BIGINT IS NULL OR a.category_id = $2) \
     AND ($3::BOOL IS NULL OR a.published = $3)";

/// Provides CRUD and list operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Count articles matching the filter.
    pub async fn count(pool: &PgPool, filter: &ArticleFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM articles a WHERE {FILTER_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(search_pattern(filter))
            .bind(filter.category_id)
            .bind(filter.published)
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of articles matching the filter, joined with their
    /// category name. `order_column` must come from the sort allow-list.
    pub async fn list(
        pool: &PgPool,
        filter: &ArticleFilter,
        order_column: &str,
        direction: SortDirection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {A_COLUMNS}, c.name AS category_name
             FROM articles a
             JOIN article_categories c ON c.id = a.category_id
             WHERE {FILTER_WHERE}
             ORDER BY a.{order_column} {dir}
             LIMIT $4 OFFSET $5",
            dir = direction.as_sql()
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .bind(search_pattern(filter))
            .bind(filter.category_id)
            .bind(filter.published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find an article by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create an article.
    pub async fn create(
        pool: &PgPool,
        input: &ArticleInput,
        slug: &str,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, slug, content, excerpt, image_url, published, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.image_url)
            .bind(input.published)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Update an article. Returns `None` when the article does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ArticleInput,
        slug: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = $1, slug = $2, content = $3, excerpt = $4, image_url = $5,
                published = $6, category_id = $7, updated_at = NOW()
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.image_url)
            .bind(input.published)
            .bind(input.category_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Storefront list: published articles, newest first, with category.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<ArticleWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {A_COLUMNS}, c.name AS category_name
             FROM articles a
             JOIN article_categories c ON c.id = a.category_id
             WHERE a.published = TRUE
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Storefront detail: a published article by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ArticleWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {A_COLUMNS}, c.name AS category_name
             FROM articles a
             JOIN article_categories c ON c.id = a.category_id
             WHERE a.slug = $1 AND a.published = TRUE
             ORDER BY a.created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}

/// ILIKE pattern for the filter's search term, if any.
fn search_pattern(filter: &ArticleFilter) -> Option<String> {
    filter
        .search
        .as_ref()
        .map(|s| format!("%{}%", super::escape_like(s)))
}
