//! # pzod-cli — Command-Line Interface for pzod
//!
//! Provides the `pzod` binary. The Prisma host normally drives generation
//! itself; this CLI runs the same pipeline from files on disk, which is how
//! CI checks that committed validators are up to date.
//!
//! ## Subcommands
//!
//! - `pzod generate`: read a DMMF document and write the validator modules.
//!
//! ```bash
//! pzod generate --datamodel dmmf.json --schema prisma/schema.prisma
//! pzod generate --datamodel dmmf.json --config pzod.yaml --set useCoerce=true
//! pzod generate --datamodel - --dry-run < dmmf.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; generation logic lives in `pzod-codegen`.
//! - Handlers return `anyhow::Result<u8>`: the exit code on success.

pub mod config;
pub mod generate;

use std::path::{Path, PathBuf};

/// Resolve a possibly relative path against the project root.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
