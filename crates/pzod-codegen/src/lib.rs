//! # pzod-codegen — Zod Validator Generation
//!
//! Turns Prisma datamodel descriptors into TypeScript modules that define a
//! Zod validator per model.
//!
//! ## Components
//!
//! - [`docs`]: parses `@zod` directives out of field documentation.
//! - [`compiler`]: compiles one field into one [`ValidatorExpression`].
//!   This is the core of the crate; it never fails.
//! - [`model`], [`enums`], [`barrel`]: render the model modules, the
//!   standalone enum module and `index.ts`.
//! - [`generate`]: one full run, returning [`GeneratedFile`]s.
//!
//! ## Data Flow
//!
//! ```text
//! schema.prisma ──► pzod-native ──► NativeTypeMap ─┐
//!                                                  ├─► compile() per field ──► model modules
//! DMMF JSON ──► pzod-core ──► Datamodel + Config ──┘
//! ```
//!
//! ## Crate Policy
//!
//! - Depends on `pzod-core` and `pzod-native` internally.
//! - Rendering is pure; [`write_files`] is the only filesystem write.
//! - Output is a pure function of the inputs: same datamodel, config and
//!   schema source, same bytes.

pub mod barrel;
pub mod compiler;
pub mod docs;
pub mod enums;
pub mod expr;
pub mod generate;
pub mod model;
pub mod paths;
pub mod writer;

pub use compiler::{compile, RelatedNameResolver};
pub use docs::{Directive, Directives};
pub use expr::{Deferred, ValidatorExpression};
pub use generate::{
    generate, generate_from_dmmf, generate_with_native_types, write_files, GenerateOptions,
    GeneratedFile,
};
pub use model::{render_model, ImportPaths, ModuleContext};
