use crate::core::value::Value;
use crate::schema::{FieldSource, Issue};
use std::collections::HashMap;
use std::str::FromStr;

/// Current value per field. Dates are held as ISO text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FieldSource for FormState {
    fn field_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FormState {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// What happens when several issues land on the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    #[default]
    KeepFirst,
    KeepLast,
    /// All messages joined with `"; "`.
    Aggregate,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "keep-first" => Ok(Self::KeepFirst),
            "last" | "keep-last" => Ok(Self::KeepLast),
            "aggregate" | "all" => Ok(Self::Aggregate),
            other => Err(format!("unknown error policy '{other}'")),
        }
    }
}

/// Messages from the most recent validation pass.
///
/// Field keys are always declared field names. Issues without a top-level key,
/// or keyed to an undeclared field, are kept in `general`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    fields: HashMap<String, String>,
    general: Vec<String>,
}

impl ErrorState {
    pub fn from_issues<F>(issues: &[Issue], is_field: F, policy: ErrorPolicy) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut errors = Self::default();
        for issue in issues {
            let Some(key) = issue.path.first_key().filter(|key| is_field(*key)) else {
                errors.general.push(issue.to_string());
                continue;
            };

            match errors.fields.get_mut(key) {
                None => {
                    errors.fields.insert(key.to_string(), issue.message.clone());
                }
                Some(existing) => match policy {
                    ErrorPolicy::KeepFirst => {}
                    ErrorPolicy::KeepLast => *existing = issue.message.clone(),
                    ErrorPolicy::Aggregate => {
                        existing.push_str("; ");
                        existing.push_str(&issue.message);
                    }
                },
            }
        }
        errors
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn general(&self) -> &[String] {
        &self.general
    }

    /// Number of field-keyed messages.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
