//! # Generate Subcommand
//!
//! Runs one generation from files on disk: the DMMF document, the Prisma
//! schema (for native types) and optional generator options, then writes
//! `index.ts`, `enums.ts` and one module per model to the output directory.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use pzod_codegen::{generate_from_dmmf, write_files, GenerateOptions};
use pzod_core::RawConfig;

use crate::config::{apply_overrides, load_raw_config, parse_override};
use crate::resolve_path;

/// Arguments for the `pzod generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// DMMF JSON document, or `-` to read it from stdin.
    #[arg(long, value_name = "DMMF_JSON")]
    pub datamodel: PathBuf,

    /// Prisma schema file or schema directory, scanned for `@db.*` types.
    #[arg(long, default_value = "prisma/schema.prisma")]
    pub schema: PathBuf,

    /// Output directory for the generated modules.
    #[arg(long, short, default_value = "prisma/zod")]
    pub output: PathBuf,

    /// Output directory of the Prisma client. Enum types are imported from
    /// `@prisma/client` when omitted.
    #[arg(long)]
    pub client_path: Option<PathBuf>,

    /// Generator options file (YAML, or JSON by `.json` extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override one generator option. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Print the files that would be written without touching the disk.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the generate subcommand.
///
/// Returns exit code 0 on success. Invalid options and malformed DMMF are
/// errors; nothing is written in either case.
pub fn run_generate(args: &GenerateArgs, project_root: &Path) -> Result<u8> {
    let raw = raw_config(args, project_root)?;
    let dmmf = read_datamodel(&args.datamodel, project_root)?;

    let output_dir = resolve_path(&args.output, project_root);
    let mut options = GenerateOptions::new(&output_dir, resolve_path(&args.schema, project_root));
    if let Some(client) = &args.client_path {
        options = options.with_client_path(resolve_path(client, project_root));
    }

    let files = generate_from_dmmf(&dmmf, &raw, &options).context("generation failed")?;

    if args.dry_run {
        for file in &files {
            println!("{}", output_dir.join(&file.path).display());
        }
        return Ok(0);
    }

    write_files(&output_dir, &files)
        .with_context(|| format!("failed to write modules to {}", output_dir.display()))?;
    tracing::info!(
        files = files.len(),
        output = %output_dir.display(),
        "generated zod validators"
    );
    Ok(0)
}

fn raw_config(args: &GenerateArgs, project_root: &Path) -> Result<RawConfig> {
    let base = match &args.config {
        Some(path) => load_raw_config(&resolve_path(path, project_root))?,
        None => RawConfig::new(),
    };
    Ok(apply_overrides(base, &args.overrides))
}

fn read_datamodel(path: &Path, project_root: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read DMMF from stdin")?;
        return Ok(buf);
    }
    let path = resolve_path(path, project_root);
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read DMMF document: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DMMF: &str = r#"{"datamodel": {
        "models": [{"name": "User", "fields": [
            {"name": "id", "kind": "scalar", "type": "String", "isRequired": true, "isList": false},
            {"name": "role", "kind": "enum", "type": "Role", "isRequired": true, "isList": false}
        ]}],
        "enums": [{"name": "Role", "values": [{"name": "USER"}, {"name": "ADMIN"}]}]
    }}"#;

    const SCHEMA: &str = "model User {\n  id   String @id @db.Uuid\n  role Role\n}\n";

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("prisma")).unwrap();
        std::fs::write(dir.path().join("prisma/schema.prisma"), SCHEMA).unwrap();
        std::fs::write(dir.path().join("dmmf.json"), DMMF).unwrap();
        dir
    }

    fn args() -> GenerateArgs {
        GenerateArgs {
            datamodel: PathBuf::from("dmmf.json"),
            schema: PathBuf::from("prisma/schema.prisma"),
            output: PathBuf::from("prisma/zod"),
            client_path: None,
            config: None,
            overrides: Vec::new(),
            dry_run: false,
        }
    }

    #[test]
    fn writes_modules_relative_to_the_project_root() {
        let dir = project();
        assert_eq!(run_generate(&args(), dir.path()).unwrap(), 0);

        let out = dir.path().join("prisma/zod");
        let user = std::fs::read_to_string(out.join("user.ts")).unwrap();
        assert!(user.contains("  id: z.uuid(),\n"));
        assert!(user.contains("import { Role } from '@prisma/client'\n"));
        assert!(out.join("index.ts").is_file());
        assert!(!out.join("enums.ts").exists());
    }

    #[test]
    fn config_file_and_overrides() {
        let dir = project();
        let options = "useStandaloneEnums: true\nmodelSuffix: Schema\n";
        std::fs::write(dir.path().join("pzod.yaml"), options).unwrap();
        let args = GenerateArgs {
            config: Some(PathBuf::from("pzod.yaml")),
            overrides: vec![("modelSuffix".into(), "Validator".into())],
            ..args()
        };
        run_generate(&args, dir.path()).unwrap();

        let out = dir.path().join("prisma/zod");
        let user = std::fs::read_to_string(out.join("user.ts")).unwrap();
        assert!(user.contains("export const UserValidator = z.object({\n"));
        assert!(user.contains("  role: roleSchema,\n"));
        assert!(out.join("enums.ts").is_file());
    }

    #[test]
    fn client_path_becomes_a_relative_import() {
        let dir = project();
        let args = GenerateArgs {
            client_path: Some(PathBuf::from("generated/client")),
            ..args()
        };
        run_generate(&args, dir.path()).unwrap();
        let user = std::fs::read_to_string(dir.path().join("prisma/zod/user.ts")).unwrap();
        assert!(user.contains("import { Role } from '../../generated/client'\n"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = project();
        let args = GenerateArgs {
            dry_run: true,
            ..args()
        };
        assert_eq!(run_generate(&args, dir.path()).unwrap(), 0);
        assert!(!dir.path().join("prisma/zod").exists());
    }

    #[test]
    fn invalid_option_fails_without_output() {
        let dir = project();
        let args = GenerateArgs {
            overrides: vec![("relationModel".into(), "sometimes".into())],
            ..args()
        };
        let err = run_generate(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("relationModel"));
        assert!(!dir.path().join("prisma/zod").exists());
    }

    #[test]
    fn missing_datamodel_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_generate(&args(), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("dmmf.json"));
    }
}
