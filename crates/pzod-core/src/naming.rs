//! # Generated Identifier Naming
//!
//! Every identifier the generator emits is derived here, so that the schema
//! a model module exports and the name another module imports can never
//! disagree.
//!
//! | Item | `relationModel = true` | `relationModel = "default"` |
//! |------|------------------------|-----------------------------|
//! | scalar schema | `UserModel` | `_UserModel` |
//! | complete schema | `RelatedUserModel` | `UserModel` |
//! | complete type | `CompleteUser` | `CompleteUser` |

use crate::config::{Config, ModelCase, RelationModel};

/// Suffix appended to standalone enum schema names.
pub const ENUM_SCHEMA_SUFFIX: &str = "Schema";

/// Naming rules bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Names<'a> {
    config: &'a Config,
}

impl<'a> Names<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn format(&self, prefix: &str, name: &str) -> String {
        let name = match self.config.model_case {
            ModelCase::PascalCase => name.to_string(),
            ModelCase::CamelCase => lower_first(name),
        };
        format!("{prefix}{name}{}", self.config.model_suffix)
    }

    /// Name of the scalar (relation-free) schema of `model`.
    pub fn model_name(&self, model: &str) -> String {
        match self.config.relation_model {
            RelationModel::Default => self.format("_", model),
            _ => self.format("", model),
        }
    }

    /// Name of the lazily built, relation-inclusive schema of `model`.
    pub fn related_model_name(&self, model: &str) -> String {
        match self.config.relation_model {
            RelationModel::Default => self.format("", model),
            _ => self.format("Related", model),
        }
    }

    /// Name of the TypeScript interface describing the complete shape.
    pub fn complete_type_name(&self, model: &str) -> String {
        format!("Complete{model}")
    }

    /// File stem of the module generated for `model`.
    pub fn module_name(&self, model: &str) -> String {
        model.to_lowercase()
    }
}

/// Name of the standalone schema const of an enum: `Role` → `roleSchema`.
pub fn enum_schema_name(enum_name: &str) -> String {
    format!("{}{ENUM_SCHEMA_SUFFIX}", lower_first(enum_name))
}

/// Name of the inferred type of a standalone enum: `role` → `RoleSchema`.
pub fn enum_schema_type_name(enum_name: &str) -> String {
    format!("{}{ENUM_SCHEMA_SUFFIX}", upper_first(enum_name))
}

/// Lowercase the first character, leaving the rest untouched.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_model_true_prefixes_related() {
        let config = Config::default();
        let names = Names::new(&config);
        assert_eq!(names.model_name("User"), "UserModel");
        assert_eq!(names.related_model_name("User"), "RelatedUserModel");
        assert_eq!(names.complete_type_name("User"), "CompleteUser");
    }

    #[test]
    fn relation_model_default_underscores_scalar_schema() {
        let config = Config {
            relation_model: RelationModel::Default,
            ..Config::default()
        };
        let names = Names::new(&config);
        assert_eq!(names.model_name("User"), "_UserModel");
        assert_eq!(names.related_model_name("User"), "UserModel");
    }

    #[test]
    fn camel_case_and_custom_suffix() {
        let config = Config {
            model_case: ModelCase::CamelCase,
            model_suffix: "Schema".into(),
            ..Config::default()
        };
        let names = Names::new(&config);
        assert_eq!(names.model_name("UserProfile"), "userProfileSchema");
        assert_eq!(names.related_model_name("UserProfile"), "RelateduserProfileSchema");
    }

    #[test]
    fn enum_names() {
        assert_eq!(enum_schema_name("Role"), "roleSchema");
        assert_eq!(enum_schema_name("LowerCaseRole"), "lowerCaseRoleSchema");
        assert_eq!(enum_schema_type_name("status"), "StatusSchema");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn module_names_are_lowercase() {
        let config = Config::default();
        assert_eq!(Names::new(&config).module_name("NativeTypes"), "nativetypes");
    }
}
