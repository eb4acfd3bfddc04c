//! Handlers for the `/articles` admin resource.
//!
//! Articles carry at most one cover image. The same file-ordering discipline
//! as packages applies: a fresh upload is written before the row, removed
//! again if the write fails, and a replaced or dropped cover is only deleted
//! from disk after the row change is durable.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tripdesk_core::article::{validate_content, validate_excerpt};
use tripdesk_core::error::CoreError;
use tripdesk_core::listing::{self, ListPage, SortDirection};
use tripdesk_core::package::{parse_id_field, validate_title};
use tripdesk_core::slug::generate_slug;
use tripdesk_core::types::DbId;
use tripdesk_db::models::article::{Article, ArticleFilter, ArticleInput, ArticleWithCategory};
use tripdesk_db::repositories::{ArticleCategoryRepo, ArticleRepo};

use crate::error::{AppError, AppResult};
use crate::forms::FormData;
use crate::handlers::packages::{discard_files, store_uploads};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::FOLDER_ARTICLES;

/// Sort keys accepted by the article list, mapped to their columns.
const SORT_KEYS: &[(&str, &str)] = &[
    ("createdAt", "created_at"),
    ("title", "title"),
    ("published", "published"),
];

/// Query parameters for `GET /articles`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<String>,
    per_page: Option<String>,
    search: Option<String>,
    category_id: Option<String>,
    published: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

/// GET /api/v1/articles
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListPage<ArticleWithCategory>>> {
    let page = listing::parse_page(params.page.as_deref());
    let per_page = listing::parse_per_page(params.per_page.as_deref());
    let filter = ArticleFilter {
        search: listing::search_term(params.search.as_deref()),
        category_id: listing::categorical(params.category_id.as_deref())
            .and_then(|v| v.parse::<DbId>().ok()),
        published: listing::bool_filter(params.published.as_deref()),
    };
    let order_column = listing::resolve_sort(params.sort_by.as_deref(), SORT_KEYS, "created_at");
    let direction = SortDirection::parse(params.sort_order.as_deref());

    let (total, items) = tokio::try_join!(
        ArticleRepo::count(&state.pool, &filter),
        ArticleRepo::list(
            &state.pool,
            &filter,
            order_column,
            direction,
            per_page,
            listing::offset(page, per_page),
        ),
    )?;

    Ok(Json(ListPage::new(items, total, page, per_page)))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;
    Ok(Json(article))
}

/// POST /api/v1/articles
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Article>)> {
    let form = FormData::from_multipart(multipart).await?;
    let mut input = parse_article_input(&form)?;
    ensure_category_exists(&state, input.category_id).await?;

    let stored = store_uploads(&state, &form, "image", FOLDER_ARTICLES).await?;
    input.image_url = stored.first().map(|(url, _)| url.clone());

    let slug = generate_slug(&input.title);
    match ArticleRepo::create(&state.pool, &input, &slug).await {
        Ok(article) => {
            tracing::info!(
                user_id = user.user_id,
                article_id = article.id,
                slug = %article.slug,
                "Created article"
            );
            Ok((StatusCode::CREATED, Json(article)))
        }
        Err(e) => {
            discard_files(&state, stored.iter().map(|(url, _)| url.as_str())).await;
            Err(e.into())
        }
    }
}

/// PUT /api/v1/articles/{id}
///
/// A fresh `image` upload replaces the cover; the `removeImage` flag drops
/// it; otherwise the current cover is kept.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Article>> {
    let existing = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    let form = FormData::from_multipart(multipart).await?;
    let mut input = parse_article_input(&form)?;
    ensure_category_exists(&state, input.category_id).await?;

    let stored = store_uploads(&state, &form, "image", FOLDER_ARTICLES).await?;
    let fresh = stored.first().map(|(url, _)| url.clone());

    input.image_url = match &fresh {
        Some(url) => Some(url.clone()),
        None if form.flag("removeImage") => None,
        None => existing.image_url.clone(),
    };

    let slug = generate_slug(&input.title);
    let article = match ArticleRepo::update(&state.pool, id, &input, &slug).await {
        Ok(Some(article)) => article,
        Ok(None) => {
            discard_files(&state, fresh.as_deref().into_iter()).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Article",
                id,
            }));
        }
        Err(e) => {
            discard_files(&state, fresh.as_deref().into_iter()).await;
            return Err(e.into());
        }
    };

    // Drop the old cover only once the new row is durable.
    if let Some(old) = &existing.image_url {
        if article.image_url.as_deref() != Some(old.as_str()) {
            discard_files(&state, std::iter::once(old.as_str())).await;
        }
    }

    tracing::info!(
        user_id = user.user_id,
        article_id = id,
        slug = %article.slug,
        "Updated article"
    );
    Ok(Json(article))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let existing = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    let removed = ArticleRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }));
    }

    if let Some(image) = &existing.image_url {
        discard_files(&state, std::iter::once(image.as_str())).await;
    }

    tracing::info!(user_id = user.user_id, article_id = id, "Deleted article");
    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// Parse and validate the text fields of an article form. `image_url` is
/// resolved by the caller once uploads are stored.
fn parse_article_input(form: &FormData) -> Result<ArticleInput, AppError> {
    let title = form.require("title")?.trim().to_string();
    validate_title(&title)?;

    let content = form.require("content")?.to_string();
    validate_content(&content)?;

    let excerpt = form.text("excerpt").unwrap_or_default().to_string();
    validate_excerpt(&excerpt)?;

    Ok(ArticleInput {
        title,
        content,
        excerpt,
        image_url: None,
        published: form.flag("published"),
        category_id: parse_id_field("categoryId", form.require("categoryId")?)?,
    })
}

/// Reject writes that point at a nonexistent category with a field-level
/// validation error instead of letting the FK violation surface as a 500.
async fn ensure_category_exists(state: &AppState, category_id: DbId) -> Result<(), AppError> {
    if ArticleCategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field 'categoryId' references unknown article category {category_id}"
        ))));
    }
    Ok(())
}
