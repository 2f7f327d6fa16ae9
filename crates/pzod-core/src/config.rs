//! # Generator Configuration
//!
//! Prisma hands every generator its `generator { ... }` block as a flat map
//! of string values. [`RawConfig`] is that map; [`Config::from_raw`]
//! validates it into the typed, immutable [`Config`] that every compiler and
//! emitter call receives explicitly.
//!
//! Validation is fail-fast: a single bad value aborts the run before any
//! output exists. Unknown keys are ignored so that host-specific keys do not
//! break generation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;

/// A raw configuration value. Prisma always passes strings; YAML and JSON
/// config files may carry native booleans.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    fn as_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The unvalidated generator block.
pub type RawConfig = BTreeMap<String, ConfigValue>;

/// Whether and how relation-inclusive ("complete") schemas are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationModel {
    /// Emit complete schemas under the plain model name; the scalar schema
    /// gets a leading underscore.
    Default,
    /// Emit complete schemas under a `Related` prefix.
    #[default]
    Enabled,
    /// Emit scalar schemas only.
    Disabled,
}

impl RelationModel {
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }
}

/// Casing applied to the model name inside generated schema identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelCase {
    #[default]
    PascalCase,
    CamelCase,
}

/// Validated generation options. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub relation_model: RelationModel,
    pub model_suffix: String,
    pub model_case: ModelCase,
    /// Prefix base validators with `z.coerce`.
    pub use_coerce: bool,
    /// Emit a `decimal.js` helper schema for Decimal fields.
    pub use_decimal_js: bool,
    /// Emit enums once in `enums.ts` and reference them by name.
    pub use_standalone_enums: bool,
    /// Follow Prisma's JSON nullability, which excludes `null` from the JSON
    /// literal union.
    pub prisma_json_nullability: bool,
    pub use_min_length: bool,
    pub use_trim_strings: bool,
    pub use_prefault_empty_string: bool,
    /// Module of user-supplied helpers, relative to the schema directory.
    pub imports: Option<String>,
    /// Module specifier Zod is imported from (`zod`, `zod/v4`, ...).
    pub zod_import: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relation_model: RelationModel::Enabled,
            model_suffix: "Model".to_string(),
            model_case: ModelCase::PascalCase,
            use_coerce: false,
            use_decimal_js: true,
            use_standalone_enums: false,
            prisma_json_nullability: true,
            use_min_length: false,
            use_trim_strings: false,
            use_prefault_empty_string: false,
            imports: None,
            zod_import: "zod".to_string(),
        }
    }
}

impl Config {
    /// Validate a raw generator block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first key whose value is
    /// outside its accepted set.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (key, value) in raw {
            match key.as_str() {
                "relationModel" => {
                    config.relation_model = match value.as_text().as_str() {
                        "default" => RelationModel::Default,
                        "true" => RelationModel::Enabled,
                        "false" => RelationModel::Disabled,
                        other => {
                            return Err(invalid(key, other, "\"default\", \"true\" or \"false\""))
                        }
                    }
                }
                "modelSuffix" => config.model_suffix = value.as_text(),
                "modelCase" => {
                    config.model_case = match value.as_text().as_str() {
                        "PascalCase" => ModelCase::PascalCase,
                        "camelCase" => ModelCase::CamelCase,
                        other => return Err(invalid(key, other, "\"PascalCase\" or \"camelCase\"")),
                    }
                }
                "useCoerce" => config.use_coerce = parse_bool(key, value)?,
                "useDecimalJs" => config.use_decimal_js = parse_bool(key, value)?,
                "useStandaloneEnums" => config.use_standalone_enums = parse_bool(key, value)?,
                "prismaJsonNullability" => config.prisma_json_nullability = parse_bool(key, value)?,
                "useMinLength" => config.use_min_length = parse_bool(key, value)?,
                "useTrimStrings" => config.use_trim_strings = parse_bool(key, value)?,
                "usePrefaultEmptyString" => {
                    config.use_prefault_empty_string = parse_bool(key, value)?
                }
                "imports" => config.imports = Some(value.as_text()),
                "zodImport" => {
                    let specifier = value.as_text();
                    if specifier.trim().is_empty() {
                        return Err(invalid(key, &specifier, "a non-empty module specifier"));
                    }
                    config.zod_import = specifier;
                }
                _ => tracing::debug!(key = %key, "ignoring unknown generator option"),
            }
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &ConfigValue) -> Result<bool, ConfigError> {
    match value {
        ConfigValue::Bool(b) => Ok(*b),
        ConfigValue::Text(s) => match s.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(invalid(key, other, "\"true\" or \"false\"")),
        },
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
