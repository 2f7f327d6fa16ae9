//! Standalone enum module (`enums.ts`).
//!
//! Emitted only when `useStandaloneEnums` is set and the datamodel has at
//! least one enum. Model modules then import `<enum>Schema` from here
//! instead of inlining `z.enum(Type)`.

use pzod_core::{enum_schema_name, enum_schema_type_name, Config, EnumDescriptor};

use crate::writer::{Import, SourceWriter};

/// File stem of the enum module.
pub const ENUMS_MODULE: &str = "enums";

/// Render `enums.ts`.
pub fn render_enums(enums: &[EnumDescriptor], config: &Config) -> String {
    let mut out = SourceWriter::new();
    out.line(Import::namespace("z", config.zod_import.as_str()).to_string());

    for descriptor in enums {
        let schema = enum_schema_name(&descriptor.name);
        let values: Vec<String> = descriptor
            .values
            .iter()
            .map(|v| format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'")))
            .collect();

        out.blank_line();
        out.line(format!("export const {schema} = z.enum([{}])", values.join(", ")));
        out.blank_line();
        out.line(format!(
            "export type {} = z.infer<typeof {schema}>",
            enum_schema_type_name(&descriptor.name)
        ));
    }
    out.finish()
}
