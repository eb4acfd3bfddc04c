//! Handlers for the `/settings` singleton resource.
//!
//! Site settings are a single row (id 1). The update arrives as a multipart
//! form because it may carry a logo upload; logo replacement follows the
//! same file-ordering rules as package images.

use axum::extract::{Multipart, State};
use axum::Json;
use tripdesk_core::error::CoreError;
use tripdesk_db::models::settings::{SettingsInput, SiteSettings};
use tripdesk_db::repositories::SettingsRepo;

use crate::error::{AppError, AppResult};
use crate::forms::FormData;
use crate::handlers::packages::{discard_files, store_uploads};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::uploads::FOLDER_LOGOS;

/// GET /api/v1/settings
///
/// Returns `null` until the settings have been written for the first time.
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Option<SiteSettings>>> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings
///
/// A fresh `logo` upload replaces the current logo; the `removeLogo` flag
/// drops it; otherwise the stored logo is kept.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<SiteSettings>> {
    let form = FormData::from_multipart(multipart).await?;
    let existing = SettingsRepo::get(&state.pool).await?;
    let old_logo = existing.as_ref().and_then(|s| s.logo.clone());

    let mut input = parse_settings_input(&form)?;

    let stored = store_uploads(&state, &form, "logo", FOLDER_LOGOS).await?;
    let fresh = stored.first().map(|(url, _)| url.clone());

    input.logo = match &fresh {
        Some(url) => Some(url.clone()),
        None if form.flag("removeLogo") => None,
        None => old_logo.clone(),
    };

    let settings = match SettingsRepo::upsert(&state.pool, &input).await {
        Ok(settings) => settings,
        Err(e) => {
            discard_files(&state, fresh.as_deref().into_iter()).await;
            return Err(e.into());
        }
    };

    // Drop the replaced or removed logo only after the row is durable.
    if let Some(old) = &old_logo {
        if settings.logo.as_deref() != Some(old.as_str()) {
            discard_files(&state, std::iter::once(old.as_str())).await;
        }
    }

    tracing::info!(
        user_id = admin.user_id,
        is_online = settings.is_online,
        "Updated site settings"
    );
    Ok(Json(settings))
}

/// Parse and validate the text fields of the settings form. `logo` is
/// resolved by the caller once a possible upload is stored.
fn parse_settings_input(form: &FormData) -> Result<SettingsInput, AppError> {
    let site_name = form.require("siteName")?.trim().to_string();

    let smtp_port = match form.text("smtpPort").filter(|v| !v.trim().is_empty()) {
        Some(raw) => Some(raw.trim().parse::<i32>().map_err(|_| {
            AppError::Core(CoreError::Validation(
                "Field 'smtpPort' must be an integer".into(),
            ))
        })?),
        None => None,
    };

    Ok(SettingsInput {
        site_name,
        description: form.text("description").unwrap_or_default().to_string(),
        logo: None,
        // Absent means online; only the literal "false" takes the site down.
        is_online: form.text("isOnline") != Some("false"),
        smtp_host: optional(form.text("smtpHost")),
        smtp_port,
        smtp_user: optional(form.text("smtpUser")),
        smtp_pass: optional(form.text("smtpPass")),
        smtp_from: optional(form.text("smtpFrom")),
    })
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
