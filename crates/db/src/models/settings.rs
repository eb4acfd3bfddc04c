//! Site settings singleton model and write payload.

use serde::Serialize;
use sqlx::FromRow;
use tripdesk_core::types::Timestamp;

/// The single row of the `site_settings` table (id = 1).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSettings {
    pub id: i64,
    pub site_name: String,
    pub description: String,
    /// Reference path of the site logo, if one is set.
    pub logo: Option<String>,
    /// When false the public storefront shows the maintenance page.
    pub is_online: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub smtp_from: Option<String>,
    pub updated_at: Timestamp,
}

/// Validated write payload for the settings upsert. The handler resolves the
/// final logo reference (kept, replaced, or removed) before the DB write.
#[derive(Debug, Clone)]
pub struct SettingsInput {
    pub site_name: String,
    pub description: String,
    pub logo: Option<String>,
    pub is_online: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub smtp_from: Option<String>,
}
