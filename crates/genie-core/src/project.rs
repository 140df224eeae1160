//! Inspection of the project being generated into

use std::path::Path;
use walkdir::WalkDir;

use crate::templates::MODULES_DIR;

/// Names of the feature modules under `src/modules`, sorted.
///
/// A project without a modules directory has no modules. The directory
/// walk runs on the blocking pool.
pub async fn list_modules(root: &Path) -> Vec<String> {
    let modules_dir = root.join(MODULES_DIR);
    match tokio::task::spawn_blocking(move || scan_modules(&modules_dir)).await {
        Ok(modules) => modules,
        Err(e) => {
            tracing::warn!(error = %e, "module scan did not complete");
            Vec::new()
        }
    }
}

fn scan_modules(modules_dir: &Path) -> Vec<String> {
    if !modules_dir.is_dir() {
        return Vec::new();
    }

    let mut modules: Vec<String> = WalkDir::new(modules_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();

    modules.sort();
    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_no_modules_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_modules(dir.path()).await.is_empty());
    }

    #[tokio::test]
    async fn test_lists_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        let modules = dir.path().join(MODULES_DIR);
        fs::create_dir_all(modules.join("Shop/components")).unwrap();
        fs::create_dir_all(modules.join("Auth")).unwrap();
        fs::create_dir_all(modules.join(".cache")).unwrap();
        fs::write(modules.join("index.js"), "").unwrap();

        assert_eq!(list_modules(dir.path()).await, vec!["Auth", "Shop"]);
    }
}
