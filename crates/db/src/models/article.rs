//! Article models, write payload, and list-filter types.

use serde::Serialize;
use sqlx::FromRow;
use tripdesk_core::types::{DbId, Timestamp};

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    /// Reference path of the cover image, if any.
    pub image_url: Option<String>,
    pub published: bool,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An article joined with its category name, as returned by list queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    pub category_name: String,
}

/// Validated write payload for creating or updating an article. The slug is
/// recomputed from the title on every write.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub category_id: DbId,
}

/// Resolved predicate for article list queries.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Case-insensitive substring over title and excerpt.
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    pub published: Option<bool>,
}
