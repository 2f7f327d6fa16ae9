//! # pzod-native — Native Column-Type Recovery
//!
//! Prisma strips `@db.*` attributes from the DMMF datamodel it hands to
//! generators. This crate recovers them from the schema source so the
//! compiler can refine validators (`VarChar(255)` → `max(255)`, `Uuid` →
//! `z.uuid()`, ...).
//!
//! ## Pipeline
//!
//! 1. [`resolve`] turns a schema path (file or directory) into schema text.
//! 2. A [`NativeTypeSource`] (by default the tolerant [`LexicalScanner`])
//!    turns the text into a [`NativeTypeMap`].
//! 3. Consumers split each raw annotation with [`NativeTypeHint::parse`]
//!    and match on the exact tag.
//!
//! The map is built once per run before any emission and is read-only
//! afterwards. Every failure in this crate degrades to "no hint".

pub mod hint;
pub mod map;
pub mod resolve;
pub mod scanner;

pub use hint::NativeTypeHint;
pub use map::{FieldNativeTypes, NativeTypeMap};
pub use resolve::{resolve, NativeTypeResolver, DEFAULT_SCHEMA_FILE};
pub use scanner::{LexicalScanner, NativeTypeSource};
