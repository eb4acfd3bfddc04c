//! Repository for the `site_settings` singleton (row id = 1).

use sqlx::PgPool;

use crate::models::settings::{SettingsInput, SiteSettings};

/// Column list for site_settings queries.
const COLUMNS: &str = "id, site_name, description, logo, is_online, \
    smtp_host, smtp_port, smtp_user, smtp_pass, smtp_from, updated_at";

/// Fixed primary key of the singleton row.
const SINGLETON_ID: i64 = 1;

/// Provides read/upsert access to the site settings singleton.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch the settings row, if it has ever been written.
    pub async fn get(pool: &PgPool) -> Result<Option<SiteSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE id = $1");
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the singleton row.
    pub async fn upsert(pool: &PgPool, input: &SettingsInput) -> Result<SiteSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings
                (id, site_name, description, logo, is_online,
                 smtp_host, smtp_port, smtp_user, smtp_pass, smtp_from)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (id) DO UPDATE SET
                site_name = EXCLUDED.site_name,
                description = EXCLUDED.description,
                logo = EXCLUDED.logo,
                is_online = EXCLUDED.is_online,
                smtp_host = EXCLUDED.smtp_host,
                smtp_port = EXCLUDED.smtp_port,
                smtp_user = EXCLUDED.smtp_user,
                smtp_pass = EXCLUDED.smtp_pass,
                smtp_from = EXCLUDED.smtp_from,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SINGLETON_ID)
            .bind(&input.site_name)
            .bind(&input.description)
            .bind(&input.logo)
            .bind(input.is_online)
            .bind(&input.smtp_host)
            .bind(input.smtp_port)
            .bind(&input.smtp_user)
            .bind(&input.smtp_pass)
            .bind(&input.smtp_from)
            .fetch_one(pool)
            .await
    }
}
