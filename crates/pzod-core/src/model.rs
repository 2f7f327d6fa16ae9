//! # Datamodel Descriptors
//!
//! Read-only projections of the Prisma DMMF datamodel: models with their
//! ordered fields, and enums with their ordered values. Descriptors are
//! built once per generation run (usually by deserializing the DMMF JSON the
//! Prisma host hands to generators) and never mutated afterwards.
//!
//! DMMF encodes cardinality and nullability as `isList` / `isRequired`
//! booleans and relations as kind `object`. The descriptors normalize those
//! into [`Cardinality`], [`Nullability`] and [`FieldKind::Relation`] at
//! deserialization time, and keep only literal default values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DatamodelError;

/// Classification of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A built-in Prisma scalar (`String`, `Int`, `Json`, ...).
    Scalar,
    /// A reference to a datamodel enum.
    Enum,
    /// A relation to another model (DMMF kind `object`).
    #[serde(rename = "object", alias = "relation")]
    Relation,
    /// A field of an `Unsupported("...")` database type.
    Unsupported,
}

/// The built-in Prisma scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    BigInt,
    Float,
    Decimal,
    DateTime,
    Boolean,
    Bytes,
    Json,
}

impl ScalarType {
    /// Parse a declared Prisma type name. Returns `None` for anything that is
    /// not one of the built-in scalars.
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "String" => Self::String,
            "Int" => Self::Int,
            "BigInt" => Self::BigInt,
            "Float" => Self::Float,
            "Decimal" => Self::Decimal,
            "DateTime" => Self::DateTime,
            "Boolean" => Self::Boolean,
            "Bytes" => Self::Bytes,
            "Json" => Self::Json,
            _ => return None,
        };
        Some(scalar)
    }

    /// The Prisma spelling of this scalar.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::BigInt => "BigInt",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::Boolean => "Boolean",
            Self::Bytes => "Bytes",
            Self::Json => "Json",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a field holds one value or a list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    Single,
    List,
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullability {
    #[default]
    Required,
    Optional,
}

/// A literal default value declared with `@default(...)`.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
}

impl DefaultValue {
    /// Extract a literal default for a field of the given kind and type.
    ///
    /// Function defaults (`now()`, `uuid()`, `autoincrement()`), list
    /// defaults, and literals whose JSON type does not match the field type
    /// carry no usable literal and yield `None`.
    pub fn from_dmmf(kind: FieldKind, type_name: &str, value: &Value) -> Option<Self> {
        match (kind, ScalarType::from_name(type_name), value) {
            (FieldKind::Scalar, Some(ScalarType::Boolean), Value::Bool(b)) => {
                Some(Self::Boolean(*b))
            }
            (
                FieldKind::Scalar,
                Some(ScalarType::Int | ScalarType::Float | ScalarType::Decimal),
                Value::Number(n),
            ) => Some(Self::Number(n.clone())),
            (FieldKind::Scalar, Some(ScalarType::String), Value::String(s))
            | (FieldKind::Enum, _, Value::String(s)) => Some(Self::String(s.clone())),
            _ => None,
        }
    }
}

/// One declared model field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Declared type name: a scalar name, an enum name, or a model name.
    pub type_name: String,
    pub cardinality: Cardinality,
    pub nullability: Nullability,
    pub default: Option<DefaultValue>,
    /// Free-text `///` documentation attached to the field.
    pub documentation: Option<String>,
}

impl FieldDescriptor {
    fn new(name: &str, kind: FieldKind, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            type_name: type_name.to_string(),
            cardinality: Cardinality::Single,
            nullability: Nullability::Required,
            default: None,
            documentation: None,
        }
    }

    /// A required, single-valued scalar field.
    pub fn scalar(name: &str, type_name: &str) -> Self {
        Self::new(name, FieldKind::Scalar, type_name)
    }

    /// A required, single-valued enum field.
    pub fn enumeration(name: &str, enum_name: &str) -> Self {
        Self::new(name, FieldKind::Enum, enum_name)
    }

    /// A required, single-valued relation field.
    pub fn relation(name: &str, model_name: &str) -> Self {
        Self::new(name, FieldKind::Relation, model_name)
    }

    /// Mark the field as a list.
    pub fn list(mut self) -> Self {
        self.cardinality = Cardinality::List;
        self
    }

    /// Mark the field as optional.
    pub fn optional(mut self) -> Self {
        self.nullability = Nullability::Optional;
        self
    }

    /// Attach a literal default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach documentation text.
    pub fn with_documentation(mut self, documentation: &str) -> Self {
        self.documentation = Some(documentation.to_string());
        self
    }

    /// The built-in scalar type, if this is a scalar field of a known type.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.kind {
            FieldKind::Scalar => ScalarType::from_name(&self.type_name),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.cardinality == Cardinality::List
    }

    pub fn is_required(&self) -> bool {
        self.nullability == Nullability::Required
    }

    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Relation
    }
}

/// DMMF wire shape of a field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    kind: FieldKind,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    is_list: bool,
    #[serde(default = "default_true")]
    is_required: bool,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    documentation: Option<String>,
}

fn default_true() -> bool {
    true
}

impl From<RawField> for FieldDescriptor {
    fn from(raw: RawField) -> Self {
        let default = if raw.is_list {
            None
        } else {
            raw.default
                .as_ref()
                .and_then(|v| DefaultValue::from_dmmf(raw.kind, &raw.type_name, v))
        };
        Self {
            name: raw.name,
            kind: raw.kind,
            type_name: raw.type_name,
            cardinality: if raw.is_list {
                Cardinality::List
            } else {
                Cardinality::Single
            },
            nullability: if raw.is_required {
                Nullability::Required
            } else {
                Nullability::Optional
            },
            default,
            documentation: raw.documentation,
        }
    }
}

/// One datamodel model with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl ModelDescriptor {
    pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            documentation: None,
        }
    }

    /// Scalar, enum and unsupported fields, in declaration order.
    pub fn value_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_relation())
    }

    /// Relation fields, in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    pub fn has_relations(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_relation)
    }
}

/// One datamodel enum with its values in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEnum")]
pub struct EnumDescriptor {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDescriptor {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Deserialize)]
struct RawEnum {
    name: String,
    values: Vec<RawEnumValue>,
}

/// DMMF lists enum values as `{ "name": ..., "dbName": ... }` objects;
/// hand-written fixtures often use bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnumValue {
    Named { name: String },
    Bare(String),
}

impl From<RawEnum> for EnumDescriptor {
    fn from(raw: RawEnum) -> Self {
        Self {
            name: raw.name,
            values: raw
                .values
                .into_iter()
                .map(|v| match v {
                    RawEnumValue::Named { name } | RawEnumValue::Bare(name) => name,
                })
                .collect(),
        }
    }
}

/// The models and enums of one Prisma schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Datamodel {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

impl Datamodel {
    /// Parse a DMMF document.
    ///
    /// Accepts either the full DMMF document (`{"datamodel": {...}, ...}`)
    /// or the bare datamodel object.
    pub fn from_json(input: &str) -> Result<Self, DatamodelError> {
        let mut document: Value = serde_json::from_str(input)?;
        let datamodel = match document.get_mut("datamodel") {
            Some(inner) => inner.take(),
            None => document,
        };
        Ok(serde_json::from_value(datamodel)?)
    }

    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }
}
