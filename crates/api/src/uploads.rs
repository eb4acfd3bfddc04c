//! Local image storage under the public upload root.
//!
//! Stored files live at `<public_dir>/uploads/<folder>/<uuid>-<name>` and are
//! referenced everywhere else by the path relative to the public root
//! (`/uploads/<folder>/<uuid>-<name>`), which is also the URL the frontend
//! requests them at via the `/uploads` static route.

use std::io;
use std::path::PathBuf;

use uuid::Uuid;

/// Upload folder for package gallery images.
pub const FOLDER_PACKAGES: &str = "packages";

/// Upload folder for article cover images.
pub const FOLDER_ARTICLES: &str = "articles";

/// Upload folder for the site logo.
pub const FOLDER_LOGOS: &str = "logos";

/// Reference-path prefix of every managed file.
const UPLOAD_PREFIX: &str = "/uploads/";

/// Stores and removes uploaded images on the local filesystem.
#[derive(Debug)]
pub struct ImageStore {
    public_dir: PathBuf,
}

impl ImageStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Write `bytes` under the given upload folder with a collision-resistant
    /// name and return the reference path (`/uploads/<folder>/<file>`).
    pub async fn store(
        &self,
        bytes: &[u8],
        folder: &str,
        original_name: &str,
    ) -> io::Result<String> {
        let filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
        let dir = self.public_dir.join("uploads").join(folder);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), bytes).await?;
        Ok(format!("{UPLOAD_PREFIX}{folder}/{filename}"))
    }

    /// Delete the file a reference path points at.
    ///
    /// A no-op (not an error) when the reference is empty, missing on disk,
    /// or does not point inside the managed upload root — the last case
    /// keeps a crafted reference from deleting files elsewhere.
    pub async fn remove(&self, reference: &str) -> io::Result<()> {
        let Some(relative) = reference.strip_prefix(UPLOAD_PREFIX) else {
            return Ok(());
        };
        if relative.is_empty()
            || relative
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Ok(());
        }

        let path = self.public_dir.join("uploads").join(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Whether a reference path currently resolves to a stored file.
    /// Used by tests and maintenance tooling, never by request handling.
    pub fn exists(&self, reference: &str) -> bool {
        reference
            .strip_prefix(UPLOAD_PREFIX)
            .map(|relative| self.public_dir.join("uploads").join(relative).is_file())
            .unwrap_or(false)
    }
}

/// Reduce an uploaded filename to a safe set of characters. Path separators
/// and anything exotic become hyphens; an empty result becomes `file`.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_reference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let reference = store
            .store(b"fake-image-bytes", FOLDER_PACKAGES, "beach.jpg")
            .await
            .expect("store should succeed");

        assert!(reference.starts_with("/uploads/packages/"));
        assert!(reference.ends_with("-beach.jpg"));
        assert!(store.exists(&reference));
    }

    #[tokio::test]
    async fn test_store_generates_distinct_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let a = store.store(b"a", FOLDER_ARTICLES, "cover.png").await.unwrap();
        let b = store.store(b"b", FOLDER_ARTICLES, "cover.png").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let reference = store.store(b"x", FOLDER_LOGOS, "logo.png").await.unwrap();
        store.remove(&reference).await.expect("remove should succeed");
        assert!(!store.exists(&reference));
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());
        assert!(store.remove("/uploads/packages/gone.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_ignores_references_outside_upload_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outside = dir.path().join("secrets.txt");
        tokio::fs::write(&outside, b"keep me").await.unwrap();

        let store = ImageStore::new(dir.path());
        store.remove("/etc/passwd").await.unwrap();
        store.remove("secrets.txt").await.unwrap();
        store.remove("/uploads/../secrets.txt").await.unwrap();
        store.remove("").await.unwrap();

        assert!(outside.is_file());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("beach day.jpg"), "beach-day.jpg");
        assert_eq!(sanitize_filename("../../evil.sh"), "..-..-evil.sh");
        assert_eq!(sanitize_filename("ç!!"), "file");
    }
}
