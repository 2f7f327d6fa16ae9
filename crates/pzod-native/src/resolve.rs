//! # Schema Source Resolution
//!
//! Turns the schema path a generator receives into schema text, then into a
//! [`NativeTypeMap`].
//!
//! ## Resolution order
//!
//! 1. The path itself.
//! 2. `<path>/schema.prisma`.
//! 3. The parent directory of the path.
//!
//! A file is read directly. A directory is walked recursively for
//! `*.prisma` files (hidden subdirectories skipped) in sorted order and the
//! files are concatenated, which covers Prisma's multi-file schema layout.
//! Nothing here is fatal: a missing path yields an empty map and an
//! unreadable file is logged and skipped.

use std::path::{Path, PathBuf};

use crate::map::NativeTypeMap;
use crate::scanner::{LexicalScanner, NativeTypeSource};

/// Conventional schema file name inside a schema directory.
pub const DEFAULT_SCHEMA_FILE: &str = "schema.prisma";

/// Extension of Prisma schema files.
pub const SCHEMA_EXTENSION: &str = "prisma";

/// Resolve `path` and scan it with the default [`LexicalScanner`].
pub fn resolve(path: &Path) -> NativeTypeMap {
    NativeTypeResolver::new(LexicalScanner).resolve(path)
}

/// Resolves schema paths and scans them with a [`NativeTypeSource`].
#[derive(Debug, Clone, Default)]
pub struct NativeTypeResolver<S = LexicalScanner> {
    source: S,
}

impl<S: NativeTypeSource> NativeTypeResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Build the native type map for a schema file or directory.
    pub fn resolve(&self, path: &Path) -> NativeTypeMap {
        let Some(target) = resolve_target(path) else {
            tracing::warn!(
                path = %path.display(),
                "schema source not found; native type refinements disabled"
            );
            return NativeTypeMap::new();
        };

        let text = read_schema_source(&target);
        let map = self.source.native_types(&text);
        tracing::debug!(
            target = %target.display(),
            models = map.len(),
            "resolved native type annotations"
        );
        map
    }
}

/// Pick the first existing candidate for `path`.
pub fn resolve_target(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let default_file = path.join(DEFAULT_SCHEMA_FILE);
    if default_file.exists() {
        return Some(default_file);
    }
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty() && parent.exists())
        .map(Path::to_path_buf)
}

/// Read a schema file, or concatenate every schema file under a directory.
pub fn read_schema_source(target: &Path) -> String {
    if target.is_file() {
        return read_or_skip(target).unwrap_or_default();
    }

    collect_schema_files(target)
        .iter()
        .filter_map(|path| read_or_skip(path))
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_or_skip(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read schema file; skipping"
            );
            None
        }
    }
}

/// Recursively collect `*.prisma` files under `dir`, sorted, skipping hidden
/// subdirectories.
pub fn collect_schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_schema_files(dir, &mut files);
    files.sort();
    files
}

fn walk_schema_files(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during schema walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to stat directory entry"
                );
                continue;
            }
        };
        // Symlinked directories are not followed; they can point back up the tree.
        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
            continue;
        }
        if file_type.is_dir() {
            if !is_hidden(&path) {
                walk_schema_files(&path, acc);
            }
        } else if path.extension().and_then(|e| e.to_str()) == Some(SCHEMA_EXTENSION) {
            acc.push(path);
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
