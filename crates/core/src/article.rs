//! Article validation.
//!
//! Title rules are shared with packages (see [`crate::package::validate_title`]).

use crate::error::CoreError;

/// Validate article body content (non-empty).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Field 'content' must not be empty".into(),
        ));
    }
    Ok(())
}

/// Validate an article excerpt (non-empty, <= 500 chars).
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    if excerpt.trim().is_empty() {
        return Err(CoreError::Validation(
            "Field 'excerpt' must not be empty".into(),
        ));
    }
    if excerpt.len() > 500 {
        return Err(CoreError::Validation(
            "Field 'excerpt' must be at most 500 characters".into(),
        ));
    }
    Ok(())
}
