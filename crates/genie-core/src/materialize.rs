//! Writing artifact plans to disk
//!
//! Directories are created first, then files are written. A failure is
//! recorded against its path and the remaining work continues; nothing is
//! ever deleted or moved. Existing files are overwritten.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::templates::ArtifactPlan;

/// Filesystem operations the materializer depends on
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create `path` and all missing parents; existing directories are fine.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate `path` and write `content`.
    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    async fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem, through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        tokio::fs::write(path, content).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// At least one directory or file could not be created
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of materializing one plan. Paths are relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub directories: Vec<PathBuf>,
    pub created: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl GenerationResult {
    pub fn status(&self) -> Status {
        if self.failures.is_empty() {
            Status::Success
        } else {
            Status::Partial
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == Status::Success
    }

    fn fail(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(path = %path.display(), %reason, "artifact not created");
        self.failures.push(Failure {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Create every directory and file of `plan` below `root`.
pub async fn materialize<F>(fs: &F, root: &Path, plan: ArtifactPlan) -> GenerationResult
where
    F: FileSystem + ?Sized,
{
    let mut result = GenerationResult::default();
    let mut failed_dirs: Vec<PathBuf> = Vec::new();

    for dir in plan.required_directories() {
        let blocked_by = failed_dirs.iter().find(|f| dir.starts_with(f)).cloned();
        if let Some(failed) = blocked_by {
            let reason = format!("parent directory {} could not be created", failed.display());
            result.fail(&dir, reason);
            failed_dirs.push(dir);
            continue;
        }

        match fs.create_dir_all(&root.join(&dir)).await {
            Ok(()) => {
                tracing::debug!(dir = %dir.display(), "directory ready");
                result.directories.push(dir);
            }
            Err(e) => {
                result.fail(&dir, e.to_string());
                failed_dirs.push(dir);
            }
        }
    }

    let (_, files) = plan.into_parts();
    for file in files {
        let blocked = file
            .parent()
            .and_then(|parent| failed_dirs.iter().find(|f| parent.starts_with(f)));
        if let Some(failed) = blocked {
            let reason = format!("directory {} could not be created", failed.display());
            result.fail(&file.path, reason);
            continue;
        }

        match fs.write_file(&root.join(&file.path), &file.content).await {
            Ok(()) => {
                tracing::debug!(file = %file.path.display(), "written");
                result.created.push(file.path);
            }
            Err(e) => result.fail(&file.path, e.to_string()),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Mutex;

    /// In-memory filesystem that fails on chosen paths
    #[derive(Default)]
    struct MemoryFs {
        dirs: Mutex<HashSet<PathBuf>>,
        files: Mutex<BTreeMap<PathBuf, String>>,
        fail_dirs: HashSet<PathBuf>,
        fail_writes: HashSet<PathBuf>,
        writes_attempted: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl FileSystem for MemoryFs {
        async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            if self.fail_dirs.iter().any(|f| path.starts_with(f)) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
            }
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        async fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
            self.writes_attempted.lock().unwrap().push(path.to_path_buf());
            if self.fail_writes.contains(path) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    fn plan() -> ArtifactPlan {
        let mut plan = ArtifactPlan::new();
        plan.add_dir("src/modules/Shop");
        plan.add_dir("src/modules/Shop/views");
        plan.add_file("src/modules/Shop/routes.js", "routes").unwrap();
        plan.add_file("src/modules/Shop/store.js", "store").unwrap();
        plan.add_file("tests/Shop.spec.js", "spec").unwrap();
        plan
    }

    #[tokio::test]
    async fn test_all_files_written() {
        let fs = MemoryFs::default();
        let result = materialize(&fs, Path::new("/project"), plan()).await;

        assert!(result.is_success());
        assert_eq!(result.created.len(), 3);
        assert_eq!(result.directories.len(), 3);
        assert_eq!(
            fs.files.lock().unwrap()[Path::new("/project/src/modules/Shop/store.js")],
            "store"
        );
        assert!(fs
            .dirs
            .lock()
            .unwrap()
            .contains(Path::new("/project/src/modules/Shop/views")));
    }

    #[tokio::test]
    async fn test_single_write_failure_does_not_stop_siblings() {
        let fs = MemoryFs {
            fail_writes: [PathBuf::from("/project/src/modules/Shop/routes.js")].into(),
            ..Default::default()
        };
        let result = materialize(&fs, Path::new("/project"), plan()).await;

        assert_eq!(result.status(), Status::Partial);
        assert_eq!(
            result.created,
            vec![
                PathBuf::from("src/modules/Shop/store.js"),
                PathBuf::from("tests/Shop.spec.js"),
            ]
        );
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].path, PathBuf::from("src/modules/Shop/routes.js"));
        assert_eq!(result.failures[0].reason, "disk full");
    }

    #[tokio::test]
    async fn test_failed_directory_skips_nested_files() {
        let fs = MemoryFs {
            fail_dirs: [PathBuf::from("/project/src/modules")].into(),
            ..Default::default()
        };
        let result = materialize(&fs, Path::new("/project"), plan()).await;

        assert_eq!(result.created, vec![PathBuf::from("tests/Shop.spec.js")]);
        let failed: Vec<_> = result.failures.iter().map(|f| f.path.clone()).collect();
        assert!(failed.contains(&PathBuf::from("src/modules/Shop")));
        assert!(failed.contains(&PathBuf::from("src/modules/Shop/views")));
        assert!(failed.contains(&PathBuf::from("src/modules/Shop/routes.js")));
        assert!(failed.contains(&PathBuf::from("src/modules/Shop/store.js")));

        // Writes below a failed directory are never attempted
        assert_eq!(
            *fs.writes_attempted.lock().unwrap(),
            vec![PathBuf::from("/project/tests/Shop.spec.js")]
        );
    }

    #[tokio::test]
    async fn test_rerun_overwrites_existing_files() {
        let fs = MemoryFs::default();
        materialize(&fs, Path::new("/p"), plan()).await;
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from("/p/tests/Shop.spec.js"), "edited".into());

        let result = materialize(&fs, Path::new("/p"), plan()).await;
        assert!(result.is_success());
        assert_eq!(
            fs.files.lock().unwrap()[Path::new("/p/tests/Shop.spec.js")],
            "spec"
        );
    }

    #[tokio::test]
    async fn test_tokio_fs_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let result = materialize(&TokioFs, dir.path(), plan()).await;

        assert!(result.is_success());
        let routes = std::fs::read_to_string(dir.path().join("src/modules/Shop/routes.js")).unwrap();
        assert_eq!(routes, "routes");
        assert!(dir.path().join("src/modules/Shop/views").is_dir());
        assert!(TokioFs.exists(&dir.path().join("tests/Shop.spec.js")).await);
    }
}
