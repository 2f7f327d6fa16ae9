//! # Generation Run
//!
//! One run turns a [`Datamodel`] plus a validated [`Config`] into in-memory
//! [`GeneratedFile`]s. Native type annotations are resolved exactly once,
//! before any module is rendered, and every module is rendered from the
//! same read-only inputs.
//!
//! ## Output
//!
//! | File | When |
//! |------|------|
//! | `index.ts` | always |
//! | `enums.ts` | `useStandaloneEnums` and at least one enum |
//! | `<model>.ts` | one per model, lowercase name |
//!
//! [`write_files`] puts them on disk; everything before it is in memory.

use std::path::{Path, PathBuf};

use pzod_core::{Config, Datamodel, Names, PzodError, RawConfig};
use pzod_native::NativeTypeMap;

use crate::barrel::{render_barrel, INDEX_MODULE};
use crate::enums::{render_enums, ENUMS_MODULE};
use crate::model::{render_model, ImportPaths, ModuleContext};
use crate::paths::{module_specifier, relative};

/// Module enum types are imported from when no client path is given.
pub const DEFAULT_CLIENT_MODULE: &str = "@prisma/client";

/// Extension of generated modules.
pub const MODULE_EXTENSION: &str = "ts";

/// One generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    fn module(stem: &str, contents: String) -> Self {
        Self {
            path: PathBuf::from(format!("{stem}.{MODULE_EXTENSION}")),
            contents,
        }
    }
}

/// Filesystem locations of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory the generated modules are written to.
    pub output_dir: PathBuf,
    /// Prisma schema file or schema directory.
    pub schema_path: PathBuf,
    /// Output directory of the Prisma client. Enum types are imported from
    /// `@prisma/client` when unset.
    pub client_path: Option<PathBuf>,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>, schema_path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            schema_path: schema_path.into(),
            client_path: None,
        }
    }

    pub fn with_client_path(mut self, client_path: impl Into<PathBuf>) -> Self {
        self.client_path = Some(client_path.into());
        self
    }

    /// Directory the `imports` option is resolved against.
    pub fn schema_dir(&self) -> &Path {
        let is_schema_file = self
            .schema_path
            .extension()
            .is_some_and(|ext| ext == pzod_native::resolve::SCHEMA_EXTENSION);
        match self.schema_path.parent() {
            Some(parent) if is_schema_file => parent,
            _ => self.schema_path.as_path(),
        }
    }

    /// Resolve the module specifiers shared by every model module.
    pub fn import_paths(&self, config: &Config) -> ImportPaths {
        let prisma_client = self
            .client_path
            .as_deref()
            .map(|client| module_specifier(&relative(&self.output_dir, client)))
            .unwrap_or_else(|| DEFAULT_CLIENT_MODULE.to_string());
        let helpers = config.imports.as_deref().map(|helpers| {
            module_specifier(&relative(&self.output_dir, &self.schema_dir().join(helpers)))
        });
        ImportPaths {
            prisma_client,
            helpers,
        }
    }
}

/// Validate `raw`, parse the DMMF document and run [`generate`].
///
/// The configuration is checked first, so an invalid generator block aborts
/// the run before the datamodel is even read.
///
/// # Errors
///
/// [`PzodError::Config`] for a rejected option, [`PzodError::Datamodel`] for
/// a malformed DMMF document.
pub fn generate_from_dmmf(
    dmmf: &str,
    raw: &RawConfig,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, PzodError> {
    let config = Config::from_raw(raw)?;
    let datamodel = Datamodel::from_json(dmmf)?;
    Ok(generate(&datamodel, &config, options))
}

/// Write `files` under `output_dir`, creating the directory if needed.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<(), PzodError> {
    std::fs::create_dir_all(output_dir)?;
    for file in files {
        std::fs::write(output_dir.join(&file.path), &file.contents)?;
    }
    Ok(())
}

/// Run a full generation, scanning the schema source for native types.
pub fn generate(
    datamodel: &Datamodel,
    config: &Config,
    options: &GenerateOptions,
) -> Vec<GeneratedFile> {
    let native_types = pzod_native::resolve(&options.schema_path);
    generate_with_native_types(datamodel, config, options, &native_types)
}

/// Run a full generation against an already resolved native type map.
pub fn generate_with_native_types(
    datamodel: &Datamodel,
    config: &Config,
    options: &GenerateOptions,
    native_types: &NativeTypeMap,
) -> Vec<GeneratedFile> {
    let names = Names::new(config);
    let paths = options.import_paths(config);
    let ctx = ModuleContext {
        config,
        native_types,
        paths: &paths,
    };
    let standalone_enums = config.use_standalone_enums && !datamodel.enums.is_empty();

    let mut files = Vec::with_capacity(datamodel.models.len() + 2);
    files.push(GeneratedFile::module(
        INDEX_MODULE,
        render_barrel(&datamodel.models, config, standalone_enums),
    ));
    if standalone_enums {
        files.push(GeneratedFile::module(
            ENUMS_MODULE,
            render_enums(&datamodel.enums, config),
        ));
    }

    for model in &datamodel.models {
        tracing::debug!(model = %model.name, fields = model.fields.len(), "rendering model module");
        files.push(GeneratedFile::module(
            &names.module_name(&model.name),
            render_model(model, &ctx),
        ));
    }

    tracing::debug!(
        models = datamodel.models.len(),
        enums = datamodel.enums.len(),
        files = files.len(),
        "generation complete"
    );
    files
}
