//! # Model Module Emitter
//!
//! Renders the TypeScript module of one model:
//!
//! 1. Imports (Zod, user helpers, `decimal.js`, enums, related models).
//! 2. Helper schemas for `Json` and `Decimal` fields.
//! 3. The scalar schema: `z.object({...})` over every non-relation field.
//! 4. The complete schema, when relation schemas are enabled and the model
//!    has relations.
//!
//! ## Cyclic relations
//!
//! `User.posts -> Post` and `Post.author -> User` reference each other, and
//! `Category.parent -> Category` references itself. The complete schema is
//! therefore never built eagerly: the relation extension is wrapped in a
//! [`Deferred`] value rendered as `z.lazy(() => ...)`, so each reference is
//! resolved on first use. A self relation stays in the extension (it refers
//! to the schema being defined) but is left out of the import list.

use pzod_core::{Config, FieldDescriptor, ModelDescriptor, Names, ScalarType};
use pzod_native::NativeTypeMap;

use crate::compiler::{compile, DECIMAL_SCHEMA, JSON_SCHEMA};
use crate::docs::{self, Directives};
use crate::enums::ENUMS_MODULE;
use crate::expr::{jsdoc, Deferred, ObjectLiteral};
use crate::writer::{Import, SourceWriter};

/// Module every generated module imports related schemas from.
pub const INDEX_IMPORT: &str = "./index";

/// Module specifiers resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPaths {
    /// Where enum types come from when enums are not standalone.
    pub prisma_client: String,
    /// Specifier of the user helper module (`imports` option), relative to
    /// the output directory.
    pub helpers: Option<String>,
}

/// Shared, read-only inputs of every model module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleContext<'a> {
    pub config: &'a Config,
    pub native_types: &'a NativeTypeMap,
    pub paths: &'a ImportPaths,
}

/// Render the module of `model`.
pub fn render_model(model: &ModelDescriptor, ctx: &ModuleContext<'_>) -> String {
    let names = Names::new(ctx.config);

    let needs_json = model
        .fields
        .iter()
        .any(|f| f.scalar_type() == Some(ScalarType::Json));
    let needs_decimal = ctx.config.use_decimal_js
        && model.fields.iter().any(|f| {
            f.scalar_type() == Some(ScalarType::Decimal) && !field_docs(f).has_custom_schema()
        });
    let needs_complete = ctx.config.relation_model.is_enabled() && model.has_relations();

    let mut out = SourceWriter::new();
    for import in imports(model, ctx, &names, needs_decimal, needs_complete) {
        out.line(import.to_string());
    }

    if needs_json {
        out.blank_line();
        out.lines(json_helper(ctx.config));
    }
    if needs_decimal {
        out.blank_line();
        out.lines(decimal_helper());
    }

    out.blank_line();
    let model_docs = docs::parse(model.documentation.as_deref());
    out.lines(jsdoc(&model_docs.comments));
    out.line(scalar_schema(model, ctx, &names));

    if needs_complete {
        out.blank_line();
        out.line(complete_interface(model, &names));
        out.blank_line();
        out.line(complete_schema(model, ctx, &names));
    }

    out.finish()
}

fn field_docs(field: &FieldDescriptor) -> Directives {
    docs::parse(field.documentation.as_deref())
}

fn imports(
    model: &ModelDescriptor,
    ctx: &ModuleContext<'_>,
    names: &Names<'_>,
    needs_decimal: bool,
    needs_complete: bool,
) -> Vec<Import> {
    let mut list = vec![Import::namespace("z", ctx.config.zod_import.as_str())];

    if let Some(helpers) = &ctx.paths.helpers {
        list.push(Import::namespace("imports", helpers.as_str()));
    }

    if needs_decimal {
        list.push(Import::named(["Decimal"], "decimal.js"));
    }

    let enum_types: Vec<&str> = model
        .fields
        .iter()
        .filter(|f| f.kind == pzod_core::FieldKind::Enum)
        .map(|f| f.type_name.as_str())
        .collect();
    if !enum_types.is_empty() {
        list.push(if ctx.config.use_standalone_enums {
            Import::named(
                enum_types.iter().map(|t| pzod_core::enum_schema_name(t)),
                format!("./{ENUMS_MODULE}"),
            )
        } else {
            Import::named(enum_types, ctx.paths.prisma_client.as_str())
        });
    }

    if needs_complete {
        let related: Vec<String> = model
            .relation_fields()
            .filter(|f| f.type_name != model.name)
            .flat_map(|f| {
                [
                    names.complete_type_name(&f.type_name),
                    names.related_model_name(&f.type_name),
                ]
            })
            .collect();
        if !related.is_empty() {
            list.push(Import::named(related, INDEX_IMPORT));
        }
    }

    list
}

fn json_helper(config: &Config) -> Vec<String> {
    let (null_type, null_schema) = if config.prisma_json_nullability {
        ("", "")
    } else {
        (" | null", ", z.null()")
    };
    vec![
        "// Helper schema for JSON fields".to_string(),
        format!("type Literal = boolean | number | string{null_type}"),
        "type Json = Literal | { [key: string]: Json } | Json[]".to_string(),
        format!(
            "const literalSchema = z.union([z.string(), z.number(), z.boolean(){null_schema}])"
        ),
        format!(
            "const {JSON_SCHEMA}: z.ZodSchema<Json> = z.lazy(() => z.union([literalSchema, z.array({JSON_SCHEMA}), z.record(z.string(), {JSON_SCHEMA})]))"
        ),
    ]
}

fn decimal_helper() -> Vec<String> {
    let mut lines = vec![
        "// Helper schema for Decimal fields".to_string(),
        format!("const {DECIMAL_SCHEMA} = z"),
    ];
    lines.extend(
        [
            "  .instanceof(Decimal)",
            "  .or(z.string())",
            "  .or(z.number())",
            "  .refine((value) => {",
            "    try {",
            "      return new Decimal(value)",
            "    } catch (error) {",
            "      return false",
            "    }",
            "  })",
            "  .transform((value) => new Decimal(value))",
        ]
        .map(String::from),
    );
    lines
}

fn scalar_schema(model: &ModelDescriptor, ctx: &ModuleContext<'_>, names: &Names<'_>) -> String {
    let resolver = |name: &str| names.model_name(name);
    let mut object = ObjectLiteral::default();
    for field in model.value_fields() {
        let parsed = field_docs(field);
        let native = ctx.native_types.get(&model.name, &field.name);
        let expr = compile(
            field,
            native,
            &parsed.directives,
            field.default.as_ref(),
            ctx.config,
            &resolver,
        );
        object.push(&field.name, expr, parsed.comments);
    }
    format!("export const {} = z.object({object})", names.model_name(&model.name))
}

fn complete_interface(model: &ModelDescriptor, names: &Names<'_>) -> String {
    let mut out = format!(
        "export interface {} extends z.infer<typeof {}> {{\n",
        names.complete_type_name(&model.name),
        names.model_name(&model.name)
    );
    for field in model.relation_fields() {
        let optional = if field.is_required() { "" } else { "?" };
        let list = if field.is_list() { "[]" } else { "" };
        let nullable = if field.is_required() { "" } else { " | null" };
        out.push_str(&format!(
            "  {}{optional}: {}{list}{nullable}\n",
            field.name,
            names.complete_type_name(&field.type_name)
        ));
    }
    out.push('}');
    out
}

fn complete_schema(model: &ModelDescriptor, ctx: &ModuleContext<'_>, names: &Names<'_>) -> String {
    let related_name = names.related_model_name(&model.name);
    let resolver = |name: &str| names.related_model_name(name);

    let mut extension = ObjectLiteral::default();
    for field in model.relation_fields() {
        let parsed = field_docs(field);
        let expr = compile(field, None, &parsed.directives, None, ctx.config, &resolver);
        extension.push(&field.name, expr, parsed.comments);
    }

    let lazy = Deferred(format!(
        "{}.extend({extension})",
        names.model_name(&model.name)
    ));
    format!(
        "/**\n * {related_name} contains all relations on your model in addition to the scalars\n *\n * NOTE: Lazy required in case of potential circular dependencies within schema\n */\nexport const {related_name}: z.ZodSchema<{}> = {lazy}",
        names.complete_type_name(&model.name)
    )
}
