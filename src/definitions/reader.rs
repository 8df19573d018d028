//! File access seam for definition extraction.

use std::path::{Path, PathBuf};

/// Reads module files; swapped out in tests to serve content from memory.
pub trait FileReader {
    fn read_file(&self, path: &Path) -> std::io::Result<String>;

    /// Files directly inside `dir`, in no particular order. Subdirectories
    /// are not listed.
    fn list_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>>;
}

/// Reads straight from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_file(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                files.push(path);
            }
        }
        Ok(files)
    }
}
