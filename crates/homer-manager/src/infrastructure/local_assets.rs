//! The local icon asset directory.
//!
//! Listing, saving, and serving files from `assets_dir`.  Callers validate
//! names with [`homer_core::is_safe_file_name`] before anything here joins
//! them onto the directory.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::application::CatalogError;

/// File extensions treated as images, compared case-insensitively.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "svg", "webp", "ico", "jpg", "jpeg"];

/// Image file names in `dir`, sorted.
///
/// A missing or unreadable directory yields an empty list; subdirectories
/// and non-image files are skipped.
pub async fn list_local_icons(dir: &Path) -> Vec<String> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list local icons");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "local icon listing cut short");
                break;
            }
        };
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    names
}

/// Writes `bytes` to `dir/file_name`, creating `dir` if needed and replacing
/// any existing file.  Returns the full path written.
pub async fn save_icon(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CatalogError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| CatalogError::Storage {
            path: dir.to_path_buf(),
            source,
        })?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| CatalogError::Storage {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Reads one asset for serving.  `name` must already be a safe flat name.
pub async fn read_asset(dir: &Path, name: &str) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(dir.join(name)).await
}

/// `Content-Type` for an asset, by extension.
pub fn content_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn is_image(name: &str) -> bool {
    extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_images_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["sonarr.svg", "Plex.PNG", "notes.txt", "a.jpeg", "favicon.ico"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names = list_local_icons(dir.path()).await;

        assert_eq!(names, vec!["Plex.PNG", "a.jpeg", "favicon.ico", "sonarr.svg"]);
    }

    #[tokio::test]
    async fn test_missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let names = list_local_icons(&dir.path().join("absent")).await;

        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("assets").join("tools");

        let path = save_icon(&dir, "radarr.png", b"png").await.unwrap();

        assert_eq!(path, dir.join("radarr.png"));
        assert_eq!(read_asset(&dir, "radarr.png").await.unwrap(), b"png");
    }

    #[tokio::test]
    async fn test_save_into_file_path_is_storage_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("tools");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let err = save_icon(&blocker, "a.png", b"x").await.unwrap_err();

        assert!(matches!(err, CatalogError::Storage { .. }));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
