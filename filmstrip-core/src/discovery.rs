//! Photograph discovery for the render loop.
//!
//! Scans the top level of a directory for image files in a fixed sort
//! order, so the slideshow sequence is deterministic across runs.

use std::path::{Path, PathBuf};

use crate::error::{CoreResult, config_error};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Finds photographs eligible for rendering, sorted by file name. Does not
/// search subdirectories.
pub fn find_images(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext| {
                    IMAGE_EXTENSIONS
                        .iter()
                        .any(|known| known.eq_ignore_ascii_case(ext))
                })
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(config_error(format!(
            "no images found in '{}'",
            input_dir.display()
        )));
    }

    files.sort();
    Ok(files)
}
