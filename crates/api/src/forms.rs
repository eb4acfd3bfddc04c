//! Multipart form collection for entities with file attachments.
//!
//! Package, article, and settings mutations arrive as multipart forms mixing
//! text fields with uploaded files. [`FormData`] drains the whole form once
//! and gives handlers ordered access to both, so field handling stays out of
//! the extraction loop.

use axum::extract::Multipart;
use tripdesk_core::error::CoreError;

use crate::error::AppError;

/// An uploaded file field.
#[derive(Debug)]
pub struct UploadedFile {
    /// Form field name the file arrived under.
    pub field: String,
    /// Client-supplied filename (used for primary-image designation).
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// All fields of a drained multipart form, in arrival order.
#[derive(Debug, Default)]
pub struct FormData {
    texts: Vec<(String, String)>,
    files: Vec<UploadedFile>,
}

impl FormData {
    /// Drain a multipart stream. A part with a filename is collected as a
    /// file (empty file parts are skipped -- browsers send those for blank
    /// file inputs); everything else is collected as text.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if let Some(filename) = field.file_name().map(str::to_string) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    form.files.push(UploadedFile {
                        field: name,
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.texts.push((name, text));
            }
        }

        Ok(form)
    }

    /// First value of a text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// All values of a repeated text field, in order.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.texts
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Required non-empty text field, or a validation error naming it.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        match self.text(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(AppError::Core(CoreError::Validation(format!(
                "Field '{name}' is required"
            )))),
        }
    }

    /// Whether a text field carries the literal `"true"`.
    pub fn flag(&self, name: &str) -> bool {
        self.text(name) == Some("true")
    }

    /// All files uploaded under a field name, in order.
    pub fn files(&self, name: &str) -> Vec<&UploadedFile> {
        self.files
            .iter()
            .filter(|file| file.field == name)
            .collect()
    }
}
