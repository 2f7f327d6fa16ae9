//! Parsing a DMMF document as the Prisma host emits it.
//!
//! Real documents carry many keys the generator does not read (`dbName`,
//! `relationFromFields`, `isUpdatedAt`, the `schema` and `mappings`
//! sections). They must be ignored, and the fields that are read must be
//! normalized the same way as hand-written fixtures.

use pzod_core::{
    Cardinality, Config, Datamodel, DefaultValue, FieldKind, Names, Nullability, ScalarType,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DOCUMENT: &str = r#"{
  "datamodel": {
    "enums": [
      {
        "name": "Status",
        "values": [
          { "name": "DRAFT", "dbName": null },
          { "name": "PUBLISHED", "dbName": "published" }
        ],
        "dbName": null
      }
    ],
    "models": [
      {
        "name": "Article",
        "dbName": "articles",
        "documentation": "A published piece",
        "primaryKey": null,
        "uniqueFields": [],
        "uniqueIndexes": [],
        "isGenerated": false,
        "fields": [
          {
            "name": "id", "kind": "scalar", "isList": false, "isRequired": true,
            "isUnique": false, "isId": true, "isReadOnly": false, "hasDefaultValue": true,
            "type": "Int", "default": { "name": "autoincrement", "args": [] },
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "title", "kind": "scalar", "isList": false, "isRequired": true,
            "isUnique": false, "isId": false, "isReadOnly": false, "hasDefaultValue": false,
            "type": "String", "documentation": "Headline\n@zod.max(120)",
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "status", "kind": "enum", "isList": false, "isRequired": true,
            "isUnique": false, "isId": false, "isReadOnly": false, "hasDefaultValue": true,
            "type": "Status", "default": "DRAFT",
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "tags", "kind": "scalar", "isList": true, "isRequired": true,
            "isUnique": false, "isId": false, "isReadOnly": false, "hasDefaultValue": true,
            "type": "String", "default": ["news"],
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "rating", "kind": "scalar", "isList": false, "isRequired": false,
            "isUnique": false, "isId": false, "isReadOnly": false, "hasDefaultValue": true,
            "type": "Float", "default": 2.5,
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "authorId", "kind": "scalar", "isList": false, "isRequired": true,
            "isUnique": false, "isId": false, "isReadOnly": true, "hasDefaultValue": false,
            "type": "Int", "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "author", "kind": "object", "isList": false, "isRequired": true,
            "isUnique": false, "isId": false, "isReadOnly": false, "hasDefaultValue": false,
            "type": "Author", "relationName": "ArticleToAuthor",
            "relationFromFields": ["authorId"], "relationToFields": ["id"],
            "isGenerated": false, "isUpdatedAt": false
          },
          {
            "name": "legacy", "kind": "unsupported", "isList": false, "isRequired": false,
            "type": "tsvector", "isGenerated": false, "isUpdatedAt": false
          }
        ]
      },
      {
        "name": "Author",
        "dbName": null,
        "fields": [
          { "name": "id", "kind": "scalar", "isList": false, "isRequired": true, "type": "Int" },
          {
            "name": "articles", "kind": "object", "isList": true, "isRequired": true,
            "type": "Article", "relationName": "ArticleToAuthor",
            "relationFromFields": [], "relationToFields": []
          }
        ]
      }
    ],
    "types": []
  },
  "schema": { "inputObjectTypes": {}, "outputObjectTypes": {}, "enumTypes": {} },
  "mappings": { "modelOperations": [], "otherOperations": { "read": [], "write": [] } }
}"#;

fn datamodel() -> Datamodel {
    Datamodel::from_json(DOCUMENT).expect("fixture parses")
}

// ---------------------------------------------------------------------------
// Models and fields
// ---------------------------------------------------------------------------

#[test]
fn models_and_fields_keep_declaration_order() {
    let dm = datamodel();
    let names: Vec<_> = dm.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Article", "Author"]);

    let article = dm.model("Article").unwrap();
    let fields: Vec<_> = article.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        fields,
        ["id", "title", "status", "tags", "rating", "authorId", "author", "legacy"]
    );
    assert_eq!(article.documentation.as_deref(), Some("A published piece"));
}

#[test]
fn flags_are_normalized() {
    let dm = datamodel();
    let article = dm.model("Article").unwrap();

    let tags = &article.fields[3];
    assert_eq!(tags.cardinality, Cardinality::List);
    assert_eq!(tags.scalar_type(), Some(ScalarType::String));

    let rating = &article.fields[4];
    assert_eq!(rating.nullability, Nullability::Optional);

    let author = &article.fields[6];
    assert_eq!(author.kind, FieldKind::Relation);
    assert!(author.is_relation());

    assert_eq!(article.fields[7].kind, FieldKind::Unsupported);
    assert_eq!(article.fields[7].scalar_type(), None);
}

#[test]
fn only_literal_defaults_survive() {
    let dm = datamodel();
    let article = dm.model("Article").unwrap();

    assert_eq!(article.fields[0].default, None, "autoincrement() is a function default");
    assert_eq!(article.fields[2].default, Some(DefaultValue::String("DRAFT".into())));
    assert_eq!(article.fields[3].default, None, "list defaults are dropped");
    assert!(matches!(article.fields[4].default, Some(DefaultValue::Number(_))));
}

#[test]
fn relations_and_enums() {
    let dm = datamodel();
    assert!(dm.model("Article").unwrap().has_relations());
    assert_eq!(dm.model("Author").unwrap().relation_fields().count(), 1);

    assert_eq!(dm.enums.len(), 1);
    assert_eq!(dm.enums[0].values, ["DRAFT", "PUBLISHED"]);
}

#[test]
fn bare_datamodel_object_is_accepted() {
    let document: serde_json::Value = serde_json::from_str(DOCUMENT).unwrap();
    let bare = document["datamodel"].to_string();
    assert_eq!(Datamodel::from_json(&bare).unwrap(), datamodel());
}

#[test]
fn schema_names_for_parsed_models() {
    let dm = datamodel();
    let config = Config::default();
    let names = Names::new(&config);
    let article = dm.model("Article").unwrap();
    assert_eq!(names.model_name(&article.name), "ArticleModel");
    assert_eq!(names.related_model_name(&article.name), "RelatedArticleModel");
    assert_eq!(names.module_name(&article.name), "article");
}
