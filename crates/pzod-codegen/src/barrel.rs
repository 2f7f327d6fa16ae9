//! Barrel module (`index.ts`) re-exporting every generated module.

use pzod_core::{Config, ModelDescriptor, Names};

use crate::enums::ENUMS_MODULE;
use crate::writer::SourceWriter;

/// File stem of the barrel module.
pub const INDEX_MODULE: &str = "index";

/// Render `index.ts`. `include_enums` adds the enum module when it is
/// generated.
pub fn render_barrel(models: &[ModelDescriptor], config: &Config, include_enums: bool) -> String {
    let names = Names::new(config);
    let mut out = SourceWriter::new();
    for model in models {
        out.line(format!("export * from './{}'", names.module_name(&model.name)));
    }
    if include_enums {
        out.line(format!("export * from './{ENUMS_MODULE}'"));
    }
    out.finish()
}
