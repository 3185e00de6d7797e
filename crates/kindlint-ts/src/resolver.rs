//! Filesystem-backed [`FileResolver`].

use std::path::{Path, PathBuf};

use kindlint_core::ports::FileResolver;
use walkdir::WalkDir;

use crate::patterns::PathPatterns;

/// Whether `path` is a TypeScript source file (`.ts`/`.tsx`, not `.d.ts`).
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    (name.ends_with(".ts") || name.ends_with(".tsx")) && !name.ends_with(".d.ts")
}

/// Lists source files under a location by walking the filesystem.
#[derive(Debug, Clone)]
pub struct FsFileResolver {
    root: PathBuf,
    exclude: PathPatterns,
}

impl FsFileResolver {
    /// Creates a resolver. `exclude` is matched relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, exclude: PathPatterns) -> Self {
        Self {
            root: root.into(),
            exclude,
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        is_source_file(path) && !self.exclude.matches(path, &self.root)
    }
}

impl FileResolver for FsFileResolver {
    fn files_under(&self, location: &Path) -> Vec<PathBuf> {
        if location.is_file() {
            return if self.accepts(location) {
                vec![location.to_path_buf()]
            } else {
                Vec::new()
            };
        }
        if !location.is_dir() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(location)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "node_modules")
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| self.accepts(path))
            .collect();
        files.sort();
        tracing::trace!(
            location = %location.display(),
            files = files.len(),
            "resolved location"
        );
        files
    }
}
