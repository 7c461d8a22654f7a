use crate::core::text::{generate_slug, slugify_input};
use crate::schema::check::TextCheck;
use crate::schema::error::SchemaError;
use crate::schema::introspect::{self, FieldDescriptor};
use crate::schema::parse::{Issue, ValidatedData};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Object-level rule evaluated after every field validated.
pub type Refinement = Arc<dyn Fn(&ValidatedData) -> Vec<Issue> + Send + Sync>;

#[derive(Debug, Clone)]
pub enum FieldType {
    Text { checks: Vec<TextCheck> },
    Boolean,
    Enumeration(Vec<String>),
    /// With `coerce`, ISO text is accepted and converted to a date.
    Date { coerce: bool },
    Number,
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Strips every `Optional` layer.
    pub fn innermost(&self) -> &FieldType {
        match self {
            Self::Optional(inner) => inner.innermost(),
            other => other,
        }
    }

    fn innermost_mut(&mut self) -> &mut FieldType {
        match self {
            Self::Optional(inner) => inner.innermost_mut(),
            other => other,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    pub fn is_text_like(&self) -> bool {
        matches!(
            self.innermost(),
            Self::Text { .. } | Self::Enumeration(_) | Self::Date { .. } | Self::Number
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self.innermost() {
            Self::Text { .. } => "string",
            Self::Boolean => "boolean",
            Self::Enumeration(_) => "enum",
            Self::Date { .. } => "date",
            Self::Number => "number",
            Self::Optional(_) => "optional",
        }
    }
}

/// How a field's value is computed from another field when that field changes.
#[derive(Clone)]
pub enum DeriveRule {
    Slug,
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl DeriveRule {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn apply(&self, source: &str) -> String {
        match self {
            Self::Slug => generate_slug(source),
            Self::Custom(f) => f(source),
        }
    }
}

impl fmt::Debug for DeriveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug => f.write_str("Slug"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeriveSpec {
    pub from: String,
    pub rule: DeriveRule,
}

/// Transform applied to every text edit of a field before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTransform {
    #[default]
    None,
    Slug,
}

impl InputTransform {
    pub fn apply(self, text: String) -> String {
        match self {
            Self::None => text,
            Self::Slug => slugify_input(&text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub ty: FieldType,
    pub label: Option<String>,
    pub description: Option<String>,
    pub required_message: Option<String>,
    pub derive: Option<DeriveSpec>,
    pub input: InputTransform,
}

impl FieldSchema {
    pub fn new(ty: FieldType) -> Self {
        Self {
            ty,
            label: None,
            description: None,
            required_message: None,
            derive: None,
            input: InputTransform::None,
        }
    }

    pub fn text() -> Self {
        Self::new(FieldType::Text { checks: Vec::new() })
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldType::Enumeration(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Date field that accepts `YYYY-MM-DD` text.
    pub fn date() -> Self {
        Self::new(FieldType::Date { coerce: true })
    }

    /// Date field without coercion. Text input is rejected.
    pub fn strict_date() -> Self {
        Self::new(FieldType::Date { coerce: false })
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    pub fn optional(mut self) -> Self {
        self.ty = FieldType::Optional(Box::new(self.ty));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    pub fn derive_from(mut self, source: impl Into<String>, rule: DeriveRule) -> Self {
        self.derive = Some(DeriveSpec {
            from: source.into(),
            rule,
        });
        self
    }

    pub fn input_transform(mut self, transform: InputTransform) -> Self {
        self.input = transform;
        self
    }

    /// Adds a text check. Ignored for non-text fields.
    pub fn check(mut self, check: TextCheck) -> Self {
        if let FieldType::Text { checks } = self.ty.innermost_mut() {
            checks.push(check);
        }
        self
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(TextCheck::min_length(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.check(TextCheck::max_length(max))
    }

    pub fn email(self) -> Self {
        self.check(TextCheck::email())
    }

    pub fn pattern(self, regex: Regex) -> Self {
        self.check(TextCheck::pattern(regex))
    }

    pub fn is_optional(&self) -> bool {
        self.ty.is_optional()
    }
}

#[derive(Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldSchema>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    pub fn describe(&self) -> Vec<FieldDescriptor> {
        introspect::describe(self)
    }

    /// Structural checks that authoring mistakes would otherwise surface at runtime.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        for (name, field) in &self.fields {
            if let FieldType::Enumeration(values) = field.ty.innermost() {
                if values.is_empty() {
                    return Err(SchemaError::invalid_field(name, "enum declares no values"));
                }
                let mut seen = HashSet::new();
                if let Some(dup) = values.iter().find(|value| !seen.insert(value.as_str())) {
                    return Err(SchemaError::invalid_field(
                        name,
                        format!("enum value '{dup}' is declared twice"),
                    ));
                }
            }

            if let Some(derive) = &field.derive {
                if derive.from == *name {
                    return Err(SchemaError::invalid_field(name, "field derives from itself"));
                }
                let Some(source) = self.fields.get(&derive.from) else {
                    return Err(SchemaError::invalid_field(
                        name,
                        format!("derives from unknown field '{}'", derive.from),
                    ));
                };
                if !source.ty.is_text_like() || !field.ty.is_text_like() {
                    return Err(SchemaError::invalid_field(
                        name,
                        "derivation requires text fields on both sides",
                    ));
                }
            }

            if field.input != InputTransform::None
                && !matches!(field.ty.innermost(), FieldType::Text { .. })
            {
                return Err(SchemaError::invalid_field(
                    name,
                    "input transforms apply to string fields only",
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("refinements", &self.refinements.len())
            .finish()
    }
}

#[derive(Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldSchema>,
    refinements: Vec<Refinement>,
}

impl SchemaBuilder {
    /// Declares a field. Redeclaring a name replaces it in its original position.
    pub fn field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn refine<F>(mut self, rule: F) -> Self
    where
        F: Fn(&ValidatedData) -> Vec<Issue> + Send + Sync + 'static,
    {
        self.refinements.push(Arc::new(rule));
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
            refinements: self.refinements,
        }
    }

    pub fn try_build(self) -> Result<Schema, SchemaError> {
        let schema = self.build();
        schema.check()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeriveRule, FieldSchema, FieldType, InputTransform, Schema};
    use crate::schema::error::SchemaError;

    #[test]
    fn optional_layers_unwrap_to_innermost() {
        let field = FieldSchema::boolean().optional().optional();
        assert!(field.is_optional());
        assert!(matches!(field.ty.innermost(), FieldType::Boolean));
    }

    #[test]
    fn checks_reach_text_through_optional() {
        let field = FieldSchema::text().optional().min_length(2);
        let FieldType::Text { checks } = field.ty.innermost() else {
            panic!("expected text field");
        };
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn check_rejects_duplicate_enum_values() {
        let result = Schema::builder()
            .field("topic", FieldSchema::enumeration(["a", "b", "a"]))
            .try_build();
        assert!(matches!(result, Err(SchemaError::InvalidField { .. })));
    }

    #[test]
    fn check_rejects_derivation_from_unknown_field() {
        let result = Schema::builder()
            .field("slug", FieldSchema::text().derive_from("title", DeriveRule::Slug))
            .try_build();
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("unknown field 'title'"));
    }

    #[test]
    fn check_rejects_transform_on_boolean() {
        let result = Schema::builder()
            .field("flag", FieldSchema::boolean().input_transform(InputTransform::Slug))
            .try_build();
        assert!(result.is_err());
    }

    #[test]
    fn empty_schema_is_rejected() {
        assert!(matches!(Schema::builder().try_build(), Err(SchemaError::Empty)));
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let schema = Schema::builder()
            .field("a", FieldSchema::text())
            .field("b", FieldSchema::text())
            .field("a", FieldSchema::boolean())
            .build();
        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(matches!(schema.field("a").map(|f| f.ty.innermost()), Some(FieldType::Boolean)));
    }
}
