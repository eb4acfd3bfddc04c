//! Travel package models, write payloads, and list-filter types.

use serde::Serialize;
use sqlx::FromRow;
use tripdesk_core::types::{DbId, Timestamp};

/// A row from the `travel_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Package {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub code: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub max_guests: i32,
    pub dormitories: i32,
    pub suites: i32,
    pub bathrooms: i32,
    pub number_of_days: i32,
    pub status: String,
    pub type_id: DbId,
    /// Reference path of the primary image, empty when the package has none.
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `package_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackageImage {
    pub id: DbId,
    pub package_id: DbId,
    pub url: String,
    pub is_main: bool,
    pub created_at: Timestamp,
}

/// A package joined with its type name, as returned by list queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PackageWithType {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub package: Package,
    pub type_name: String,
}

/// A package with its type name and all attached images.
#[derive(Debug, Serialize)]
pub struct PackageDetail {
    #[serde(flatten)]
    pub package: Package,
    pub type_name: String,
    pub images: Vec<PackageImage>,
}

/// Validated write payload for creating or updating a package. The slug is
/// passed separately because it is always recomputed from the title.
#[derive(Debug, Clone)]
pub struct PackageInput {
    pub title: String,
    pub code: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub max_guests: i32,
    pub dormitories: i32,
    pub suites: i32,
    pub bathrooms: i32,
    pub number_of_days: i32,
    pub status: String,
    pub type_id: DbId,
}

/// An image reference to persist alongside a package write.
#[derive(Debug, Clone)]
pub struct NewPackageImage {
    pub url: String,
    pub is_main: bool,
}

/// Resolved predicate for package list queries.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    /// Case-insensitive substring over title, location, and code.
    pub search: Option<String>,
    pub status: Option<String>,
    pub type_id: Option<DbId>,
}
