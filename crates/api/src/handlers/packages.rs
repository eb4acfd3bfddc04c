//! Handlers for the `/packages` admin resource.
//!
//! Package mutations arrive as multipart forms because they carry image
//! uploads alongside the text fields. Files are written to disk before the
//! database transaction; when the transaction fails the fresh files are
//! removed again, and files made obsolete by an update or delete are only
//! removed after the transaction has committed. A crash can therefore leave
//! an orphaned file on disk but never a row pointing at a missing file.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tripdesk_core::error::CoreError;
use tripdesk_core::listing::{self, ListPage, SortDirection};
use tripdesk_core::package::{
    self, parse_date_field, parse_decimal_field, parse_id_field, parse_int_field, STATUS_DRAFT,
};
use tripdesk_core::slug::generate_slug;
use tripdesk_core::types::DbId;
use tripdesk_db::models::package::{NewPackageImage, PackageDetail, PackageFilter, PackageInput};
use tripdesk_db::repositories::{PackageRepo, PackageTypeRepo};

use crate::error::{AppError, AppResult};
use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::FOLDER_PACKAGES;

/// Sort keys accepted by the package list, mapped to their columns.
const SORT_KEYS: &[(&str, &str)] = &[
    ("createdAt", "created_at"),
    ("title", "title"),
    ("price", "price"),
    ("location", "location"),
    ("startDate", "start_date"),
    ("status", "status"),
];

/// Query parameters for `GET /packages`. Everything arrives as raw strings
/// so malformed values can fall back to defaults instead of rejecting the
/// request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<String>,
    per_page: Option<String>,
    search: Option<String>,
    status: Option<String>,
    type_id: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

/// GET /api/v1/packages
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListPage<tripdesk_db::models::package::PackageWithType>>> {
    let page = listing::parse_page(params.page.as_deref());
    let per_page = listing::parse_per_page(params.per_page.as_deref());
    let filter = PackageFilter {
        search: listing::search_term(params.search.as_deref()),
        status: listing::categorical(params.status.as_deref()),
        type_id: listing::categorical(params.type_id.as_deref())
            .and_then(|v| v.parse::<DbId>().ok()),
    };
    let order_column = listing::resolve_sort(params.sort_by.as_deref(), SORT_KEYS, "created_at");
    let direction = SortDirection::parse(params.sort_order.as_deref());

    let (total, items) = tokio::try_join!(
        PackageRepo::count(&state.pool, &filter),
        PackageRepo::list(
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

/// GET /api/v1/packages/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PackageDetail>> {
    let detail = PackageRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }))?;
    Ok(Json(detail))
}

/// POST /api/v1/packages
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PackageDetail>)> {
    let form = FormData::from_multipart(multipart).await?;
    let input = parse_package_input(&form)?;
    ensure_type_exists(&state, input.type_id).await?;

    let stored = store_uploads(&state, &form, "images", FOLDER_PACKAGES).await?;
    let images = mark_images(stored, form.text("mainImage"));

    let slug = generate_slug(&input.title);
    match PackageRepo::create(&state.pool, &input, &slug, &images).await {
        Ok(detail) => {
            tracing::info!(
                user_id = user.user_id,
                package_id = detail.package.id,
                slug = %detail.package.slug,
                "Created package"
            );
            Ok((StatusCode::CREATED, Json(detail)))
        }
        Err(e) => {
            discard_files(&state, images.iter().map(|i| i.url.as_str())).await;
            Err(e.into())
        }
    }
}

/// PUT /api/v1/packages/{id}
///
/// Replaces the package's image set: `existingImages` names the reference
/// paths to keep, `images` carries fresh uploads, and `mainImage` designates
/// the primary (a kept reference path or a fresh upload's filename).
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<PackageDetail>> {
    let existing = PackageRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }))?;

    let form = FormData::from_multipart(multipart).await?;
    let input = parse_package_input(&form)?;
    ensure_type_exists(&state, input.type_id).await?;

    // Only references that are actually attached to this package survive.
    let requested_keep = form.texts("existingImages");
    let kept: Vec<String> = existing
        .images
        .iter()
        .filter(|img| requested_keep.contains(&img.url.as_str()))
        .map(|img| img.url.clone())
        .collect();

    let stored = store_uploads(&state, &form, "images", FOLDER_PACKAGES).await?;
    let fresh: Vec<String> = stored.iter().map(|(url, _)| url.clone()).collect();

    let mut candidates: Vec<(String, String)> =
        kept.iter().map(|url| (url.clone(), url.clone())).collect();
    candidates.extend(stored);
    let images = mark_images(candidates, form.text("mainImage"));

    let slug = generate_slug(&input.title);
    let detail = match PackageRepo::update(&state.pool, id, &input, &slug, &images).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            discard_files(&state, fresh.iter().map(String::as_str)).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Package",
                id,
            }));
        }
        Err(e) => {
            discard_files(&state, fresh.iter().map(String::as_str)).await;
            return Err(e.into());
        }
    };

    // The transaction is committed; now the dropped images can go.
    let dropped = existing
        .images
        .iter()
        .filter(|img| !kept.contains(&img.url))
        .map(|img| img.url.as_str());
    discard_files(&state, dropped).await;

    tracing::info!(
        user_id = user.user_id,
        package_id = id,
        slug = %detail.package.slug,
        "Updated package"
    );
    Ok(Json(detail))
}

/// DELETE /api/v1/packages/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let existing = PackageRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }))?;

    let removed = PackageRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id,
        }));
    }

    discard_files(&state, existing.images.iter().map(|img| img.url.as_str())).await;

    tracing::info!(user_id = user.user_id, package_id = id, "Deleted package");
    Ok(Json(json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Form parsing and file helpers
// ---------------------------------------------------------------------------

/// Parse and validate the text fields of a package form.
fn parse_package_input(form: &FormData) -> Result<PackageInput, AppError> {
    let title = form.require("title")?.trim().to_string();
    package::validate_title(&title)?;

    let status = form.text("status").unwrap_or(STATUS_DRAFT).to_string();
    package::validate_status(&status)?;

    Ok(PackageInput {
        title,
        code: form.require("code")?.trim().to_string(),
        description: form.require("description")?.to_string(),
        location: form.require("location")?.trim().to_string(),
        price: parse_decimal_field("price", form.require("price")?)?,
        start_date: parse_date_field("startDate", form.require("startDate")?)?,
        end_date: parse_date_field("endDate", form.require("endDate")?)?,
        max_guests: parse_int_field("maxGuests", form.text("maxGuests").unwrap_or("0"))?,
        dormitories: parse_int_field("dormitories", form.text("dormitories").unwrap_or("0"))?,
        suites: parse_int_field("suites", form.text("suites").unwrap_or("0"))?,
        bathrooms: parse_int_field("bathrooms", form.text("bathrooms").unwrap_or("0"))?,
        number_of_days: parse_int_field(
            "numberOfDays",
            form.text("numberOfDays").unwrap_or("0"),
        )?,
        status,
        type_id: parse_id_field("typeId", form.require("typeId")?)?,
    })
}

/// Reject writes that point at a nonexistent package type with a field-level
/// validation error instead of letting the FK violation surface as a 500.
async fn ensure_type_exists(state: &AppState, type_id: DbId) -> Result<(), AppError> {
    if PackageTypeRepo::find_by_id(&state.pool, type_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field 'typeId' references unknown package type {type_id}"
        ))));
    }
    Ok(())
}

/// Store every upload under a form field, returning `(reference, filename)`
/// pairs. When one write fails the earlier files are removed before the
/// error propagates.
pub(crate) async fn store_uploads(
    state: &AppState,
    form: &FormData,
    field: &str,
    folder: &str,
) -> Result<Vec<(String, String)>, AppError> {
    let mut stored = Vec::new();
    for file in form.files(field) {
        match state.images.store(&file.bytes, folder, &file.filename).await {
            Ok(reference) => stored.push((reference, file.filename.clone())),
            Err(e) => {
                discard_files(state, stored.iter().map(|(url, _)| url.as_str())).await;
                return Err(e.into());
            }
        }
    }
    Ok(stored)
}

/// Remove stored files, logging rather than failing the request when a
/// removal goes wrong. Used both for post-commit cleanup and for rolling
/// back fresh uploads after a failed transaction.
pub(crate) async fn discard_files<'a>(
    state: &AppState,
    references: impl Iterator<Item = &'a str>,
) {
    for reference in references {
        if let Err(e) = state.images.remove(reference).await {
            tracing::warn!(reference, error = %e, "Failed to remove stored image");
        }
    }
}

/// Turn `(reference, designation-key)` pairs into image rows with exactly
/// one primary.
fn mark_images(candidates: Vec<(String, String)>, main_key: Option<&str>) -> Vec<NewPackageImage> {
    package::mark_primary(candidates, main_key)
        .into_iter()
        .map(|(url, is_main)| NewPackageImage { url, is_main })
        .collect()
}
