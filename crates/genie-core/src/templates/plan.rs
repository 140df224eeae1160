//! Artifact plans: what will be written, before anything touches the disk

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{GenieError, Result};

/// A single file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub content: String,
}

impl PlannedFile {
    /// Directory that must exist before this file is written.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Ordered set of directories and files for one generation request.
///
/// File paths are unique within a plan; [`ArtifactPlan::add_file`] rejects a
/// second file at the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactPlan {
    directories: Vec<PathBuf>,
    files: Vec<PlannedFile>,
}

impl ArtifactPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a directory, even if no file will be written into it.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.directories.contains(&path) {
            self.directories.push(path);
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Result<()> {
        let path = path.into();
        if self.files.iter().any(|f| f.path == path) {
            return Err(GenieError::DuplicateArtifact { path });
        }
        self.files.push(PlannedFile {
            path,
            content: content.into(),
        });
        Ok(())
    }

    /// Append another plan, keeping path uniqueness.
    pub fn merge(&mut self, other: ArtifactPlan) -> Result<()> {
        for dir in other.directories {
            self.add_dir(dir);
        }
        for file in other.files {
            self.add_file(file.path, file.content)?;
        }
        Ok(())
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&PlannedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Declared directories followed by any file parent not already covered,
    /// in plan order and without duplicates.
    pub fn required_directories(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut dirs = Vec::new();
        let declared = self.directories.iter().map(PathBuf::as_path);
        let parents = self.files.iter().filter_map(PlannedFile::parent);
        for dir in declared.chain(parents) {
            if seen.insert(dir.to_path_buf()) {
                dirs.push(dir.to_path_buf());
            }
        }
        dirs
    }

    pub fn into_parts(self) -> (Vec<PathBuf>, Vec<PlannedFile>) {
        (self.directories, self.files)
    }
}
