//! Domain logic for the Tripdesk travel-agency CMS.
//!
//! This crate has no database or HTTP dependencies so that the API and
//! repository layers (and any future CLI tooling) can share error types,
//! validation, slug generation, and list-query resolution.

pub mod article;
pub mod error;
pub mod listing;
pub mod package;
pub mod roles;
pub mod slug;
pub mod types;
