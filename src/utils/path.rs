//! Path utilities for frame and sidecar discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{SceneValidatorError, SceneValidatorResult};

/// Image extensions recognized as frames
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "tif", "tiff"];

/// Path utilities for frame inputs
pub struct PathUtils;

impl PathUtils {
    /// Provider dump for a frame: `.json` paths are used as-is, anything else gets a `.json` sidecar
    pub fn sidecar_path(frame_path: &Path) -> PathBuf {
        if Self::has_extension(frame_path, &["json"]) {
            frame_path.to_path_buf()
        } else {
            frame_path.with_extension("json")
        }
    }

    /// Frames of a directory, sorted by file name
    ///
    /// Image files are preferred; a directory without images yields its `.json` dumps.
    /// Subdirectories are not descended into.
    pub fn collect_frame_files(dir: &Path) -> SceneValidatorResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(SceneValidatorError::config(format!(
                "Frames directory does not exist: {}",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| SceneValidatorError::Io(e.into()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        let images: Vec<PathBuf> = files
            .iter()
            .filter(|p| Self::has_extension(p, FRAME_EXTENSIONS))
            .cloned()
            .collect();
        if !images.is_empty() {
            return Ok(images);
        }

        Ok(files
            .into_iter()
            .filter(|p| Self::has_extension(p, &["json"]))
            .collect())
    }

    /// Case-insensitive extension check
    pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .map_or(false, |ext| extensions.contains(&ext.as_str()))
    }
}
