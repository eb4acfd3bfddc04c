//! Article category (taxonomy) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tripdesk_core::types::{DbId, Timestamp};

/// A row from the `article_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleCategory {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An article category with the number of articles referencing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleCategoryWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: ArticleCategory,
    pub article_count: i64,
}

/// JSON body for creating or updating an article category.
#[derive(Debug, Deserialize)]
pub struct ArticleCategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
