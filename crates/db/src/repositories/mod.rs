//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_category_repo;
pub mod article_repo;
pub mod package_repo;
pub mod package_type_repo;
pub mod settings_repo;
pub mod user_repo;

pub use article_category_repo::ArticleCategoryRepo;
pub use article_repo::ArticleRepo;
pub use package_repo::PackageRepo;
pub use package_type_repo::PackageTypeRepo;
pub use settings_repo::SettingsRepo;
pub use user_repo::UserRepo;

/// Escape LIKE metacharacters so a search term matches literally inside an
/// ILIKE pattern. Without this a `%` term would match every row and `_`
/// any single character.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
