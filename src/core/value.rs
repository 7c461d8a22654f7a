use crate::core::date::Date;
use serde::Serialize;

/// A value held in form state. Dates are stored as their ISO text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(v) => v.is_empty(),
            Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Bool(_) => "boolean",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// What a widget produces when the user edits or picks something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Bool(bool),
    Date(Date),
}

impl FieldInput {
    /// Converts the input to its stored form. Dates become `YYYY-MM-DD` text.
    pub fn normalize(self) -> Value {
        match self {
            Self::Text(v) => Value::Text(v),
            Self::Bool(v) => Value::Bool(v),
            Self::Date(date) => Value::Text(date.to_iso()),
        }
    }
}
