//! Database entity models and DTOs.

pub mod article;
pub mod article_category;
pub mod package;
pub mod package_type;
pub mod settings;
pub mod user;
