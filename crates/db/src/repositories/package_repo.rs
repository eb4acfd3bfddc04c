//! Repository for the `travel_packages` and `package_images` tables.
//!
//! Mutations that touch both tables run inside a single transaction so a
//! package row and its image rows are never observed half-written.

use sqlx::PgPool;
use tripdesk_core::listing::SortDirection;
use tripdesk_core::types::DbId;

use crate::models::package::{
    NewPackageImage, Package, PackageDetail, PackageFilter, PackageImage, PackageInput,
    PackageWithType,
};

/// Column list for travel_packages queries.
const COLUMNS: &str = "id, title, slug, code, description, location, price, \
    start_date, end_date, max_guests, dormitories, suites, bathrooms, \
    number_of_days, status, type_id, image_url, created_at, updated_at";

/// Column list qualified with the `p` alias for joined queries.
const P_COLUMNS: &str = "p.id, p.title, p.slug, p.code, p.description, p.location, p.price, \
    p.start_date, p.end_date, p.max_guests, p.dormitories, p.suites, p.bathrooms, \
    p.number_of_days, p.status, p.type_id, p.image_url, p.created_at, p.updated_at";

/// Shared predicate for list/count queries. Bind order: $1 search pattern,
/// $2 status, $3 type id; a NULL bind disables its condition.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR p.title ILIKE $1 OR p.location ILIKE $1 OR p.code ILIKE $1) \
     AND ($2::TEXT IS NULL OR p.status = $2) \
     AND ($3::BIGINT IS NULL OR p.type_id = $3)";

/// Provides CRUD and list operations for travel packages.
pub struct PackageRepo;

impl PackageRepo {
    /// Count packages matching the filter.
    pub async fn count(pool: &PgPool, filter: &PackageFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM travel_packages p WHERE {FILTER_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(search_pattern(filter))
            .bind(&filter.status)
            .bind(filter.type_id)
            .fetch_one(pool)
            .await
    }

    /// Fetch one page of packages matching the filter, joined with their
    /// type name. `order_column` must come from the sort allow-list.
    pub async fn list(
        pool: &PgPool,
        filter: &PackageFilter,
        order_column: &str,
        direction: SortDirection,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PackageWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, t.name AS type_name
             FROM travel_packages p
             JOIN package_types t ON t.id = p.type_id
             WHERE {FILTER_WHERE}
             ORDER BY p.{order_column} {dir}
             LIMIT $4 OFFSET $5",
            dir = direction.as_sql()
        );
        sqlx::query_as::<_, PackageWithType>(&query)
            .bind(search_pattern(filter))
            .bind(&filter.status)
            .bind(filter.type_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a package by id with its type name and images.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PackageDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, t.name AS type_name
             FROM travel_packages p
             JOIN package_types t ON t.id = p.type_id
             WHERE p.id = $1"
        );
        let Some(row) = sqlx::query_as::<_, PackageWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let images = Self::images(pool, id).await?;
        Ok(Some(PackageDetail {
            package: row.package,
            type_name: row.type_name,
            images,
        }))
    }

    /// List the image rows attached to a package.
    pub async fn images(pool: &PgPool, package_id: DbId) -> Result<Vec<PackageImage>, sqlx::Error> {
        sqlx::query_as::<_, PackageImage>(
            "SELECT id, package_id, url, is_main, created_at
             FROM package_images WHERE package_id = $1 ORDER BY id",
        )
        .bind(package_id)
        .fetch_all(pool)
        .await
    }

    /// Create a package and its image rows in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &PackageInput,
        slug: &str,
        images: &[NewPackageImage],
    ) -> Result<PackageDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO travel_packages
                (title, slug, code, description, location, price, start_date, end_date,
                 max_guests, dormitories, suites, bathrooms, number_of_days, status,
                 type_id, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let package = sqlx::query_as::<_, Package>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.code)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.max_guests)
            .bind(input.dormitories)
            .bind(input.suites)
            .bind(input.bathrooms)
            .bind(input.number_of_days)
            .bind(&input.status)
            .bind(input.type_id)
            .bind(primary_url(images))
            .fetch_one(&mut *tx)
            .await?;

        for image in images {
            sqlx::query("INSERT INTO package_images (package_id, url, is_main) VALUES ($1, $2, $3)")
                .bind(package.id)
                .bind(&image.url)
                .bind(image.is_main)
                .execute(&mut *tx)
                .await?;
        }

        let detail = Self::detail_in_tx(&mut tx, package).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Update a package, replacing its image rows, in one transaction.
    /// Returns `None` when the package does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PackageInput,
        slug: &str,
        images: &[NewPackageImage],
    ) -> Result<Option<PackageDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE travel_packages SET
                title = $1, slug = $2, code = $3, description = $4, location = $5,
                price = $6, start_date = $7, end_date = $8, max_guests = $9,
                dormitories = $10, suites = $11, bathrooms = $12, number_of_days = $13,
                status = $14, type_id = $15, image_url = $16, updated_at = NOW()
             WHERE id = $17
             RETURNING {COLUMNS}"
        );
        let Some(package) = sqlx::query_as::<_, Package>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.code)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.max_guests)
            .bind(input.dormitories)
            .bind(input.suites)
            .bind(input.bathrooms)
            .bind(input.number_of_days)
            .bind(&input.status)
            .bind(input.type_id)
            .bind(primary_url(images))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM package_images WHERE package_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for image in images {
            sqlx::query("INSERT INTO package_images (package_id, url, is_main) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(&image.url)
                .bind(image.is_main)
                .execute(&mut *tx)
                .await?;
        }

        let detail = Self::detail_in_tx(&mut tx, package).await?;
        tx.commit().await?;
        Ok(Some(detail))
    }

    /// Delete a package. Image rows cascade in the same statement.
    /// Returns the number of package rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM travel_packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Storefront list: ACTIVE packages, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<PackageWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, t.name AS type_name
             FROM travel_packages p
             JOIN package_types t ON t.id = p.type_id
             WHERE p.status = 'ACTIVE'
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, PackageWithType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Storefront detail: an ACTIVE package by slug, with images.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PackageDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, t.name AS type_name
             FROM travel_packages p
             JOIN package_types t ON t.id = p.type_id
             WHERE p.slug = $1 AND p.status = 'ACTIVE'
             ORDER BY p.created_at DESC
             LIMIT 1"
        );
        let Some(row) = sqlx::query_as::<_, PackageWithType>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let images = Self::images(pool, row.package.id).await?;
        Ok(Some(PackageDetail {
            package: row.package,
            type_name: row.type_name,
            images,
        }))
    }

    /// Assemble a [`PackageDetail`] inside an open transaction so the
    /// returned images reflect the writes just made.
    async fn detail_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        package: Package,
    ) -> Result<PackageDetail, sqlx::Error> {
        let type_name: String = sqlx::query_scalar("SELECT name FROM package_types WHERE id = $1")
            .bind(package.type_id)
            .fetch_one(&mut **tx)
            .await?;

        let images = sqlx::query_as::<_, PackageImage>(
            "SELECT id, package_id, url, is_main, created_at
             FROM package_images WHERE package_id = $1 ORDER BY id",
        )
        .bind(package.id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(PackageDetail {
            package,
            type_name,
            images,
        })
    }
}

/// ILIKE pattern for the filter's search term, if any.
fn search_pattern(filter: &PackageFilter) -> Option<String> {
    filter
        .search
        .as_ref()
        .map(|s| format!("%{}%", super::escape_like(s)))
}

/// The denormalized `image_url` column: the primary image's reference path,
/// or the first image's, or empty.
fn primary_url(images: &[NewPackageImage]) -> String {
    images
        .iter()
        .find(|i| i.is_main)
        .or_else(|| images.first())
        .map(|i| i.url.clone())
        .unwrap_or_default()
}
