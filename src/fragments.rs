//! Fragment discovery.
//!
//! Lists a fragments directory (non-recursively), keeps the files whose
//! contents sniff as a known image format, and falls back to the bundled
//! default set when nothing usable is found.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::ImageReader;
use walkdir::WalkDir;

use crate::config::default_frags_path;
use crate::error::{BlendError, Result};

/// An ordered, immutable set of fragment image paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSet {
    root: PathBuf,
    name: String,
    paths: Vec<PathBuf>,
}

impl FragmentSet {
    /// Scan a directory for fragment images, sorted by file name.
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(BlendError::Fragments {
                path: root.to_path_buf(),
                message: "Fragments path is not a readable directory".to_string(),
                help: Some("Pass a directory that contains image files".to_string()),
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BlendError::Fragments {
                path: root.to_path_buf(),
                message: format!("Failed to list fragments: {}", e),
                help: None,
            })?;
            let path = entry.path();

            if path.is_file() && is_image(path) {
                paths.push(path.to_path_buf());
            }
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self {
            root: root.to_path_buf(),
            name,
            paths,
        })
    }

    /// Scan `root`, falling back to the bundled default fragments when it
    /// holds no images.
    pub fn discover(root: &Path) -> Result<Self> {
        Self::discover_with_fallback(root, &default_frags_path())
    }

    /// Scan `root`, falling back to `fallback` when it holds no images.
    pub fn discover_with_fallback(root: &Path, fallback: &Path) -> Result<Self> {
        let set = Self::scan(root)?;
        if !set.is_empty() {
            return Ok(set);
        }

        tracing::info!(
            "Found no fragments in frags_path, defaulting frags_path to: {}",
            fallback.display()
        );
        let set = Self::scan(fallback)?;
        if set.is_empty() {
            return Err(BlendError::Fragments {
                path: fallback.to_path_buf(),
                message: "No valid fragment images found".to_string(),
                help: Some("Add PNG or JPEG fragments to the fragments directory".to_string()),
            });
        }

        Ok(set)
    }

    /// The directory the fragments came from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The fragment set name (last component of the directory).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Check whether a file's contents look like a supported image.
///
/// The extension is ignored; only the leading magic bytes count.
pub fn is_image(path: &Path) -> bool {
    File::open(path)
        .and_then(|file| ImageReader::new(BufReader::new(file)).with_guessed_format())
        .map(|reader| reader.format().is_some())
        .unwrap_or(false)
}
