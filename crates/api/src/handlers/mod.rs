//! HTTP request handlers, one module per resource.

pub mod article_categories;
pub mod articles;
pub mod auth;
pub mod package_types;
pub mod packages;
pub mod public;
pub mod settings;
pub mod users;
