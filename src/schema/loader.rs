//! Schema files in YAML or JSON.
//!
//! ```yaml
//! fields:
//!   title:
//!     type: string
//!     required_error: Title is required
//!     description: Enter a post title
//!   slug:
//!     type: string
//!     derive: { from: title, using: slug }
//!     input: slug
//!   featured:
//!     type: boolean
//!     optional: true
//! ```

use crate::schema::check::TextCheck;
use crate::schema::error::SchemaError;
use crate::schema::model::{DeriveRule, FieldSchema, FieldType, InputTransform, Schema};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    fields: IndexMap<String, RawField>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawType {
    String,
    Boolean,
    Enum,
    Date,
    Number,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawDeriveRule {
    Slug,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDerive {
    from: String,
    using: RawDeriveRule,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawInput {
    #[default]
    Plain,
    Slug,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMessages {
    min_length: Option<String>,
    max_length: Option<String>,
    email: Option<String>,
    pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    #[serde(rename = "type")]
    ty: RawType,
    #[serde(default)]
    optional: bool,
    label: Option<String>,
    description: Option<String>,
    required_error: Option<String>,
    #[serde(default)]
    values: Vec<String>,
    #[serde(default = "default_coerce")]
    coerce: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    #[serde(default)]
    email: bool,
    pattern: Option<String>,
    #[serde(default)]
    messages: RawMessages,
    derive: Option<RawDerive>,
    #[serde(default)]
    input: RawInput,
}

fn default_coerce() -> bool {
    true
}

impl RawField {
    fn into_field(self, name: &str) -> Result<FieldSchema, SchemaError> {
        let has_text_checks = self.min_length.is_some()
            || self.max_length.is_some()
            || self.email
            || self.pattern.is_some();
        if has_text_checks && !matches!(self.ty, RawType::String) {
            return Err(SchemaError::invalid_field(
                name,
                "length, email and pattern checks apply to string fields only",
            ));
        }
        if !self.values.is_empty() && !matches!(self.ty, RawType::Enum) {
            return Err(SchemaError::invalid_field(
                name,
                "'values' is only valid for enum fields",
            ));
        }

        let ty = match self.ty {
            RawType::String => FieldType::Text {
                checks: self.text_checks(name)?,
            },
            RawType::Boolean => FieldType::Boolean,
            RawType::Enum => FieldType::Enumeration(self.values),
            RawType::Date => FieldType::Date {
                coerce: self.coerce,
            },
            RawType::Number => FieldType::Number,
        };

        let mut field = FieldSchema::new(ty);
        if self.optional {
            field = field.optional();
        }
        field.label = self.label;
        field.description = self.description;
        field.required_message = self.required_error;
        field.input = match self.input {
            RawInput::Plain => InputTransform::None,
            RawInput::Slug => InputTransform::Slug,
        };
        if let Some(derive) = self.derive {
            let rule = match derive.using {
                RawDeriveRule::Slug => DeriveRule::Slug,
            };
            field = field.derive_from(derive.from, rule);
        }
        Ok(field)
    }

    fn text_checks(&self, name: &str) -> Result<Vec<TextCheck>, SchemaError> {
        let mut checks = Vec::new();
        if let Some(min) = self.min_length {
            checks.push(with_message(
                TextCheck::min_length(min),
                &self.messages.min_length,
            ));
        }
        if let Some(max) = self.max_length {
            checks.push(with_message(
                TextCheck::max_length(max),
                &self.messages.max_length,
            ));
        }
        if self.email {
            checks.push(with_message(TextCheck::email(), &self.messages.email));
        }
        if let Some(pattern) = &self.pattern {
            let regex = Regex::new(pattern).map_err(|source| SchemaError::Pattern {
                field: name.to_string(),
                source,
            })?;
            checks.push(with_message(
                TextCheck::pattern(regex),
                &self.messages.pattern,
            ));
        }
        Ok(checks)
    }
}

fn with_message(check: TextCheck, message: &Option<String>) -> TextCheck {
    match message {
        Some(text) => check.with_message(text.clone()),
        None => check,
    }
}

fn build(file: SchemaFile) -> Result<Schema, SchemaError> {
    let mut builder = Schema::builder();
    for (name, raw) in file.fields {
        let field = raw.into_field(&name)?;
        builder = builder.field(name, field);
    }
    builder.try_build()
}

pub fn from_yaml_str(text: &str) -> Result<Schema, SchemaError> {
    build(serde_yaml::from_str(text)?)
}

pub fn from_json_str(text: &str) -> Result<Schema, SchemaError> {
    build(serde_json::from_str(text)?)
}

/// Loads a schema file, choosing the format by extension.
pub fn load(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let read = || {
        std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let schema = match extension.as_str() {
        "yaml" | "yml" => from_yaml_str(&read()?)?,
        "json" => from_json_str(&read()?)?,
        other => return Err(SchemaError::UnsupportedFormat(other.to_string())),
    };

    tracing::debug!(path = %path.display(), fields = schema.len(), "loaded schema");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::{from_json_str, from_yaml_str, load};
    use crate::schema::error::SchemaError;
    use crate::schema::introspect::FieldKind;
    use crate::schema::model::InputTransform;

    const BLOG_YAML: &str = r#"
fields:
  title:
    type: string
    required_error: Title is required
    description: Enter a post title
  slug:
    type: string
    derive: { from: title, using: slug }
    input: slug
  publishDate:
    type: date
  topic:
    type: enum
    values: [NFL, NBA]
  featured:
    type: boolean
    optional: true
"#;

    #[test]
    fn yaml_schema_keeps_declaration_order() {
        let schema = from_yaml_str(BLOG_YAML).expect("schema");
        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["title", "slug", "publishDate", "topic", "featured"]);

        let descriptors = schema.describe();
        assert_eq!(
            descriptors[3].kind,
            FieldKind::Enumeration(vec!["NFL".to_string(), "NBA".to_string()])
        );
        assert!(descriptors[4].optional);

        let slug = schema.field("slug").expect("slug");
        assert_eq!(slug.input, InputTransform::Slug);
        assert_eq!(slug.derive.as_ref().map(|d| d.from.as_str()), Some("title"));
    }

    #[test]
    fn json_schema_with_checks() {
        let schema = from_json_str(
            r#"{"fields": {"email": {"type": "string", "email": true,
                "messages": {"email": "Invalid email address"}}}}"#,
        )
        .expect("schema");
        let issues = schema
            .safe_parse(&std::collections::HashMap::from([(
                "email".to_string(),
                crate::core::value::Value::from("nope"),
            )]))
            .expect_err("invalid email");
        assert_eq!(issues[0].message, "Invalid email address");
    }

    #[test]
    fn rejects_unknown_keys_and_misplaced_checks() {
        assert!(matches!(
            from_yaml_str("fields:\n  a:\n    type: string\n    colour: red\n"),
            Err(SchemaError::Yaml(_))
        ));
        assert!(matches!(
            from_yaml_str("fields:\n  a:\n    type: boolean\n    min_length: 2\n"),
            Err(SchemaError::InvalidField { .. })
        ));
    }

    #[test]
    fn rejects_bad_pattern() {
        let err = from_yaml_str("fields:\n  a:\n    type: string\n    pattern: '('\n")
            .expect_err("bad regex");
        assert!(matches!(err, SchemaError::Pattern { .. }));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        assert!(matches!(
            load("schema.toml"),
            Err(SchemaError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(matches!(
            load("/definitely/not/here.yaml"),
            Err(SchemaError::Io { .. })
        ));
    }
}
