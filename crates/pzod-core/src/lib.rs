//! # pzod-core — Foundational Types for pzod
//!
//! This crate is the bedrock of the pzod workspace. It defines the values
//! every generation run passes around: the datamodel descriptors, the
//! validated configuration, and the naming rules for generated
//! identifiers. Every other crate in the workspace depends on `pzod-core`;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Read-only descriptors.** [`FieldDescriptor`], [`ModelDescriptor`] and
//!    [`EnumDescriptor`] are built once from DMMF JSON and never mutated.
//!    DMMF's boolean flags are normalized into [`Cardinality`] and
//!    [`Nullability`] at the boundary.
//!
//! 2. **Explicit configuration.** [`Config`] is validated once with
//!    [`Config::from_raw`] and passed by reference into every call. There is
//!    no ambient or global configuration.
//!
//! 3. **One naming authority.** [`Names`] derives every exported and
//!    imported schema identifier.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pzod-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod model;
pub mod naming;

// Re-export primary types for ergonomic imports.
pub use config::{Config, ConfigValue, ModelCase, RawConfig, RelationModel};
pub use error::{ConfigError, DatamodelError, PzodError};
pub use model::{
    Cardinality, Datamodel, DefaultValue, EnumDescriptor, FieldDescriptor, FieldKind,
    ModelDescriptor, Nullability, ScalarType,
};
pub use naming::{enum_schema_name, enum_schema_type_name, Names};
