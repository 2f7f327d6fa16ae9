//! # Field-to-Validator Compiler
//!
//! [`compile`] turns one field into one [`ValidatorExpression`]. It is a
//! total function: anything it cannot map degrades to `z.unknown()`.
//!
//! ## Pipeline
//!
//! Every step appends to the same expression, so modifier order follows the
//! step order:
//!
//! 1. Base constructor by field kind (scalar, enum, relation).
//! 2. Native type refinement (`max(255)`, integer bounds, decimal digits).
//! 3. Minimum-length policy for required strings.
//! 4. `array()` for list fields.
//! 5. Directives: custom schema, standalone validator, extra modifiers.
//! 6. `default(...)` for literal defaults.
//! 7. `nullish()` for optional fields other than `Json`.
//!
//! Deduplication happens inside [`ValidatorExpression::push`].

use pzod_core::{Config, DefaultValue, FieldDescriptor, FieldKind, ScalarType};
use pzod_native::NativeTypeHint;

use crate::docs::Directive;
use crate::expr::{escape_string, ValidatorExpression};

/// Fallback for types without a mapping.
pub const UNKNOWN_SCHEMA: &str = "z.unknown()";

/// Name of the JSON helper schema emitted into modules with `Json` fields.
pub const JSON_SCHEMA: &str = "jsonSchema";

/// Name of the `decimal.js` helper schema.
pub const DECIMAL_SCHEMA: &str = "decimalSchema";

const OBJECT_ID_PATTERN: &str = "regex(/^[0-9a-f]{24}$/i)";
const DATE_PATTERN: &str = r"regex(/^\d{4}-\d{2}-\d{2}$/)";
const TIME_PATTERN: &str = r"regex(/^\d{2}:\d{2}:\d{2}$/)";
const TIME_TZ_PATTERN: &str = r"regex(/^\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$/)";

/// Maps a related model's type name to the schema identifier a relation
/// field references.
pub trait RelatedNameResolver {
    fn related_name(&self, model: &str) -> String;
}

impl<F> RelatedNameResolver for F
where
    F: Fn(&str) -> String,
{
    fn related_name(&self, model: &str) -> String {
        self(model)
    }
}

/// Compile one field into its validator expression.
pub fn compile(
    field: &FieldDescriptor,
    native_type: Option<&str>,
    directives: &[Directive],
    default: Option<&DefaultValue>,
    config: &Config,
    related: &dyn RelatedNameResolver,
) -> ValidatorExpression {
    let hint = native_type.and_then(NativeTypeHint::parse);

    let mut expr = match field.kind {
        FieldKind::Scalar => scalar_expression(field, hint.as_ref(), config),
        FieldKind::Enum => enum_expression(&field.type_name, config),
        FieldKind::Relation => ValidatorExpression::new(related.related_name(&field.type_name)),
        FieldKind::Unsupported => ValidatorExpression::new(UNKNOWN_SCHEMA),
    };

    if field.is_list() {
        expr.push("array()");
    }

    apply_directives(&mut expr, field, directives);

    if let Some(default) = default {
        expr.push(default_modifier(default));
    }

    if !field.is_required() && field.scalar_type() != Some(ScalarType::Json) {
        expr.push("nullish()");
    }

    expr
}

fn scalar_expression(
    field: &FieldDescriptor,
    hint: Option<&NativeTypeHint<'_>>,
    config: &Config,
) -> ValidatorExpression {
    let z = if config.use_coerce { "z.coerce" } else { "z" };
    let tag = hint.map(|h| h.tag);

    match field.scalar_type() {
        Some(ScalarType::String) => string_expression(field, hint, config, z),
        Some(ScalarType::Int) => {
            let mut expr = ValidatorExpression::new(format!("{z}.number()")).with("int()");
            for bound in tag.map(int_bounds).unwrap_or_default() {
                expr.push(*bound);
            }
            expr
        }
        Some(ScalarType::BigInt) => ValidatorExpression::new(format!("{z}.bigint()")),
        Some(ScalarType::Float) => ValidatorExpression::new(format!("{z}.number()")),
        Some(ScalarType::Decimal) => {
            let base = if config.use_decimal_js {
                DECIMAL_SCHEMA.to_string()
            } else {
                format!("{z}.number()")
            };
            let mut expr = ValidatorExpression::new(base);
            if let Some(refinement) = hint.and_then(decimal_refinement) {
                expr.push(refinement);
            }
            expr
        }
        Some(ScalarType::DateTime) => match tag {
            Some("Date") => ValidatorExpression::new(format!("{z}.string().{DATE_PATTERN}")),
            Some("Time") => ValidatorExpression::new(format!("{z}.string().{TIME_PATTERN}")),
            Some("TimeTz" | "Timetz") => {
                ValidatorExpression::new(format!("{z}.string().{TIME_TZ_PATTERN}"))
            }
            // Timestamp, Timestamptz, DateTime, DateTime2, SmallDateTime,
            // DateTimeOffset and no hint at all.
            _ => ValidatorExpression::new(format!("{z}.date()")),
        },
        Some(ScalarType::Boolean) => ValidatorExpression::new(format!("{z}.boolean()")),
        Some(ScalarType::Bytes) => ValidatorExpression::new("z.instanceof(Buffer)"),
        Some(ScalarType::Json) => ValidatorExpression::new(JSON_SCHEMA),
        None => {
            tracing::debug!(
                field = %field.name,
                type_name = %field.type_name,
                "no validator mapping for scalar type; using z.unknown()"
            );
            ValidatorExpression::new(UNKNOWN_SCHEMA)
        }
    }
}

fn string_expression(
    field: &FieldDescriptor,
    hint: Option<&NativeTypeHint<'_>>,
    config: &Config,
    z: &str,
) -> ValidatorExpression {
    let generic = format!("{z}.string()");
    let (mut expr, special) = match hint.map(|h| h.tag) {
        Some("Uuid") => (ValidatorExpression::new("z.uuid()"), true),
        Some("Citext") => (ValidatorExpression::new(format!("{generic}.toLowerCase()")), true),
        Some("VarChar" | "Char" | "NVarChar" | "NChar") => {
            let mut expr = ValidatorExpression::new(generic);
            if let Some(length) = hint.and_then(|h| h.param_u32(0)) {
                expr.push(format!("max({length})"));
            }
            (expr, false)
        }
        Some("Binary" | "VarBinary") => (ValidatorExpression::new(UNKNOWN_SCHEMA), true),
        Some("ObjectId") => (ValidatorExpression::new(generic).with(OBJECT_ID_PATTERN), true),
        // Text, NText, TinyText, MediumText, LongText, Bit, VarBit, Xml,
        // Inet and anything unrecognized.
        _ => (ValidatorExpression::new(generic), false),
    };

    if config.use_min_length && field.is_required() && !special {
        if config.use_trim_strings {
            expr.push("trim()");
        }
        expr.push("min(1)");
        if config.use_trim_strings && config.use_prefault_empty_string {
            expr.push("prefault(\"\")");
        }
    }
    expr
}

/// Paired bounds for the sized integer native types.
fn int_bounds(tag: &str) -> &'static [&'static str] {
    match tag {
        "SmallInt" => &["min(-32768)", "max(32767)"],
        "TinyInt" => &["min(-128)", "max(127)"],
        "UnsignedTinyInt" => &["min(0)", "max(255)"],
        "UnsignedSmallInt" => &["min(0)", "max(65535)"],
        "UnsignedMediumInt" => &["min(0)", "max(16777215)"],
        "UnsignedInt" => &["min(0)", "max(4294967295)"],
        _ => &[],
    }
}

/// Digit-count refinement for `Decimal(p, s)` / `Numeric(p, s)`.
fn decimal_refinement(hint: &NativeTypeHint<'_>) -> Option<String> {
    if !hint.is_any(&["Decimal", "Numeric"]) {
        return None;
    }
    let precision = hint.param_u32(0)?;
    let scale = hint.param_u32(1)?;
    if precision <= scale {
        return None;
    }
    let integer_digits = precision - scale;
    let pattern = if scale == 0 {
        format!(r"/^\d{{1,{integer_digits}}}$/")
    } else {
        format!(r"/^\d{{1,{integer_digits}}}(\.\d{{1,{scale}}})?$/")
    };
    Some(format!("refine(x => {pattern}.test(x.toString()))"))
}

fn enum_expression(enum_name: &str, config: &Config) -> ValidatorExpression {
    if config.use_standalone_enums {
        ValidatorExpression::new(pzod_core::enum_schema_name(enum_name))
    } else {
        ValidatorExpression::new(format!("z.enum({enum_name})"))
    }
}

fn apply_directives(
    expr: &mut ValidatorExpression,
    field: &FieldDescriptor,
    directives: &[Directive],
) {
    let mut custom: Option<&str> = None;
    let mut standalone: Option<&str> = None;

    for directive in directives {
        match directive {
            Directive::CustomSchema(schema) if custom.is_none() => custom = Some(schema.as_str()),
            Directive::CustomSchema(schema) => tracing::debug!(
                field = %field.name,
                ignored = %schema,
                "field has more than one custom schema; keeping the first"
            ),
            Directive::StandaloneValidator(name) => {
                if field.scalar_type() == Some(ScalarType::String) {
                    standalone.get_or_insert(name.as_str());
                } else {
                    tracing::debug!(
                        field = %field.name,
                        validator = %name,
                        "standalone validators apply to String fields only"
                    );
                }
            }
            Directive::ExtraModifier(call) => expr.push(call.as_str()),
        }
    }

    if let Some(schema) = custom {
        expr.replace_base(schema);
    } else if let Some(name) = standalone {
        expr.replace_base(format!("z.{name}()"));
    }
}

fn default_modifier(default: &DefaultValue) -> String {
    match default {
        DefaultValue::Boolean(b) => format!("default({b})"),
        DefaultValue::Number(n) => format!("default({n})"),
        DefaultValue::String(s) => format!("default(\"{}\")", escape_string(s)),
    }
}
