//! Corpus directory listing.

use std::ffi::OsStr;
use std::path::Path;
use tokio::fs;
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Recognized video file extensions, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "webm"];

/// Video file names in a corpus directory, in lexicographic order.
///
/// The returned order is the canonical corpus order: fingerprints are
/// loaded, scored and written in it, and ties resolve to its first entry.
pub async fn list_video_files(dir: impl AsRef<Path>) -> StoreResult<Vec<String>> {
    let dir = dir.as_ref();
    let metadata = fs::metadata(dir)
        .await
        .map_err(|_| StoreError::NotADirectory(dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(StoreError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(n) => n,
            None => {
                warn!(entry = ?file_name, "skipping non-UTF-8 file name");
                continue;
            }
        };
        if has_video_extension(name) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

fn has_video_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_listing_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["zebra.mp4", "alpha.MOV", "notes.txt", "beta.mkv", "clip.webm"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();

        let names = list_video_files(dir.path()).await.unwrap();
        assert_eq!(names, vec!["alpha.MOV", "beta.mkv", "clip.webm", "zebra.mp4"]);
    }

    #[tokio::test]
    async fn test_listing_rejects_non_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.mp4");
        std::fs::write(&file, b"").unwrap();

        assert!(matches!(
            list_video_files(&file).await,
            Err(StoreError::NotADirectory(_))
        ));
        assert!(matches!(
            list_video_files(dir.path().join("absent")).await,
            Err(StoreError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_extension_matching() {
        assert!(has_video_extension("a.mp4"));
        assert!(has_video_extension("a.MP4"));
        assert!(has_video_extension("dir.name/a.webm"));
        assert!(!has_video_extension("a.txt"));
        assert!(!has_video_extension("mp4"));
    }
}
