//! Explicit schema description model.
//!
//! A [`Schema`] is an ordered set of named fields. It can be validated against
//! the current form values with [`Schema::safe_parse`] and introspected into
//! [`FieldDescriptor`]s that drive widget selection.

pub mod check;
pub mod error;
pub mod introspect;
pub mod loader;
pub mod model;
pub mod parse;
pub mod presets;

pub use check::TextCheck;
pub use error::SchemaError;
pub use introspect::{FieldDescriptor, FieldKind, describe};
pub use model::{
    DeriveRule, DeriveSpec, FieldSchema, FieldType, InputTransform, Refinement, Schema,
    SchemaBuilder,
};
pub use parse::{FieldSource, FieldValue, Issue, ValidatedData};
