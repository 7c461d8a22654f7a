use crate::schema::model::{FieldType, Schema};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Widget-facing kind of a field, with optional layers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
    Enumeration(Vec<String>),
    Date,
    Unknown,
}

impl FieldKind {
    pub fn of(ty: &FieldType) -> Self {
        match ty.innermost() {
            FieldType::Text { .. } => Self::Text,
            FieldType::Boolean => Self::Boolean,
            FieldType::Enumeration(values) => Self::Enumeration(values.clone()),
            FieldType::Date { .. } => Self::Date,
            FieldType::Number | FieldType::Optional(_) => Self::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Enumeration(_) => "enumeration",
            Self::Date => "date",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
    pub optional: bool,
}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("kind", self.kind.name())?;
        if let Some(choices) = self.choices() {
            map.serialize_entry("choices", choices)?;
        }
        if let Some(placeholder) = &self.placeholder {
            map.serialize_entry("placeholder", placeholder)?;
        }
        map.serialize_entry("optional", &self.optional)?;
        map.end()
    }
}

impl FieldDescriptor {
    pub fn choices(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Enumeration(choices) => Some(choices.as_slice()),
            _ => None,
        }
    }
}

/// One descriptor per declared field, in declaration order.
pub fn describe(schema: &Schema) -> Vec<FieldDescriptor> {
    schema
        .fields()
        .map(|(name, field)| FieldDescriptor {
            name: name.to_string(),
            label: field.label.clone().unwrap_or_else(|| name.to_string()),
            kind: FieldKind::of(&field.ty),
            placeholder: field.description.clone(),
            optional: field.is_optional(),
        })
        .collect()
}
