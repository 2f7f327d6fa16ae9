//! The per-model, per-field native type map.

use std::collections::BTreeMap;

/// Field name → raw native type annotation (`VarChar(255)`, `Uuid`, ...).
pub type FieldNativeTypes = BTreeMap<String, String>;

/// Model name → field name → raw native type annotation.
///
/// Built once per generation run and read-only afterwards. A missing entry
/// means "no hint" and never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeTypeMap {
    models: BTreeMap<String, FieldNativeTypes>,
}

impl NativeTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw annotation recorded for `model.field`, verbatim.
    pub fn get(&self, model: &str, field: &str) -> Option<&str> {
        self.models.get(model)?.get(field).map(String::as_str)
    }

    /// All annotations recorded for one model.
    pub fn model(&self, model: &str) -> Option<&FieldNativeTypes> {
        self.models.get(model)
    }

    /// Record the annotations of one model block.
    ///
    /// Empty maps are not stored. When a model is seen twice (split schema
    /// files), the first annotation of a field wins.
    pub fn insert_model(&mut self, model: impl Into<String>, fields: FieldNativeTypes) {
        if fields.is_empty() {
            return;
        }
        let entry = self.models.entry(model.into()).or_default();
        for (field, native) in fields {
            entry.entry(field).or_insert(native);
        }
    }

    /// Number of models with at least one annotation.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_models_are_not_stored() {
        let mut map = NativeTypeMap::new();
        map.insert_model("User", FieldNativeTypes::new());
        assert!(map.is_empty());
        assert_eq!(map.get("User", "id"), None);
    }

    #[test]
    fn repeated_model_merges_first_wins() {
        let mut map = NativeTypeMap::new();
        map.insert_model("User", FieldNativeTypes::from([("id".to_string(), "Uuid".to_string())]));
        map.insert_model(
            "User",
            FieldNativeTypes::from([
                ("id".to_string(), "Char(36)".to_string()),
                ("name".to_string(), "VarChar(50)".to_string()),
            ]),
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("User", "id"), Some("Uuid"));
        assert_eq!(map.get("User", "name"), Some("VarChar(50)"));
    }
}
