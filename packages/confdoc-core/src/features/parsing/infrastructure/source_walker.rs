//! Source tree discovery
//!
//! Walks the root in sorted order and groups source files by directory. One
//! directory is one Go package.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::LoaderConfig;
use crate::shared::models::{ConfdocError, Result};

static MODULE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*module\s+"?([^\s"]+)"?"#).expect("valid regex"));

/// Source files of one directory
#[derive(Debug, Clone)]
pub struct PackageDir {
    /// Path relative to the root with `/` separators, empty for the root itself
    pub rel_dir: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Discover package directories under `root` in walk order.
pub fn discover_package_dirs(
    root: &Path,
    config: &LoaderConfig,
    supports_extension: impl Fn(&str) -> bool,
) -> Result<Vec<PackageDir>> {
    let mut packages: Vec<PackageDir> = Vec::new();
    let mut index: FxHashMap<PathBuf, usize> = FxHashMap::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, config));

    for entry in walker {
        let entry = entry.map_err(|e| {
            ConfdocError::load(format!("Walk error: {}", e)).with_file(root.display().to_string())
        })?;

        if !entry.file_type().is_file() || !is_source_file(&entry, config, &supports_extension) {
            continue;
        }

        let path = entry.path();
        let Some(dir) = path.parent() else {
            continue;
        };

        let slot = match index.get(dir) {
            Some(&slot) => slot,
            None => {
                packages.push(PackageDir {
                    rel_dir: relative_path(root, dir),
                    dir: dir.to_path_buf(),
                    files: Vec::new(),
                });
                index.insert(dir.to_path_buf(), packages.len() - 1);
                packages.len() - 1
            }
        };
        packages[slot].files.push(path.to_path_buf());
    }

    Ok(packages)
}

fn is_skipped_dir(entry: &DirEntry, config: &LoaderConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || name.starts_with('_')
        || config.skip_dirs.iter().any(|d| d.as_str() == name.as_ref())
}

fn is_source_file(
    entry: &DirEntry,
    config: &LoaderConfig,
    supports_extension: &impl Fn(&str) -> bool,
) -> bool {
    let name = entry.file_name().to_string_lossy();
    if !config.include_tests && name.ends_with("_test.go") {
        return false;
    }
    entry
        .path()
        .extension()
        .map(|ext| supports_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// `path` relative to `root`, with `/` separators
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Module path declared by `go.mod` at the root, if any
pub fn read_module_path(root: &Path) -> Result<Option<String>> {
    let go_mod = root.join("go.mod");
    if !go_mod.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&go_mod).map_err(|e| {
        ConfdocError::load(format!("Failed to read go.mod: {}", e))
            .with_file(go_mod.display().to_string())
            .with_source(e)
    })?;

    Ok(MODULE_LINE
        .captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

/// Import path of the package in `rel_dir`
pub fn package_id(module: Option<&str>, rel_dir: &str, package_name: &str) -> String {
    match (module, rel_dir.is_empty()) {
        (Some(module), true) => module.to_string(),
        (Some(module), false) => format!("{}/{}", module, rel_dir),
        (None, true) => package_name.to_string(),
        (None, false) => rel_dir.to_string(),
    }
}
