use crate::core::date::Date;
use crate::core::path::IssuePath;
use crate::core::value::Value;
use crate::schema::check::run_checks;
use crate::schema::model::{FieldSchema, FieldType, Schema};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: IssuePath,
    pub message: String,
}

impl Issue {
    pub fn new(path: IssuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Issue on a top-level field.
    pub fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssuePath::key(field), message)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A schema-coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Date(Date),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Output of a successful parse. Holds only declared fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidatedData {
    values: IndexMap<String, FieldValue>,
}

impl ValidatedData {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Anything that can answer "what is the current value of field X".
pub trait FieldSource {
    fn field_value(&self, name: &str) -> Option<&Value>;
}

impl FieldSource for HashMap<String, Value> {
    fn field_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Schema {
    /// Validates `source` against every field, then the refinements.
    ///
    /// Undeclared keys are stripped. Issues are reported in field declaration
    /// order; refinements only run when every field passed.
    pub fn safe_parse<S: FieldSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<ValidatedData, Vec<Issue>> {
        let mut data = ValidatedData::default();
        let mut issues = Vec::new();

        for (name, field) in self.fields() {
            match parse_field(field, &field.ty, source.field_value(name)) {
                Ok(Some(value)) => {
                    data.values.insert(name.to_string(), value);
                }
                Ok(None) => {}
                Err(messages) => {
                    issues.extend(messages.into_iter().map(|message| Issue::at(name, message)));
                }
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        for refinement in self.refinements() {
            issues.extend(refinement(&data));
        }

        if issues.is_empty() { Ok(data) } else { Err(issues) }
    }
}

fn parse_field(
    field: &FieldSchema,
    ty: &FieldType,
    value: Option<&Value>,
) -> Result<Option<FieldValue>, Vec<String>> {
    if let FieldType::Optional(inner) = ty {
        return match value {
            None => Ok(None),
            Some(_) => parse_field(field, inner, value),
        };
    }

    let Some(value) = value else {
        return Err(vec![
            field
                .required_message
                .clone()
                .unwrap_or_else(|| "Required".to_string()),
        ]);
    };

    match ty {
        FieldType::Text { checks } => {
            let Value::Text(text) = value else {
                return Err(vec![mismatch("string", value)]);
            };
            let failures = run_checks(checks, text);
            if failures.is_empty() {
                Ok(Some(FieldValue::Text(text.clone())))
            } else {
                Err(failures)
            }
        }
        FieldType::Boolean => match value {
            Value::Bool(flag) => Ok(Some(FieldValue::Bool(*flag))),
            other => Err(vec![mismatch("boolean", other)]),
        },
        FieldType::Enumeration(choices) => {
            let expected = choices
                .iter()
                .map(|choice| format!("'{choice}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            match value {
                Value::Text(text) if choices.iter().any(|choice| choice == text) => {
                    Ok(Some(FieldValue::Text(text.clone())))
                }
                Value::Text(text) => Err(vec![format!(
                    "Invalid enum value. Expected {expected}, received '{text}'"
                )]),
                other => Err(vec![format!(
                    "Expected {expected}, received {}",
                    other.type_name()
                )]),
            }
        }
        FieldType::Date { coerce } => match value {
            Value::Text(text) if *coerce => Date::parse_iso(text)
                .map(|date| Some(FieldValue::Date(date)))
                .map_err(|_| vec!["Invalid date".to_string()]),
            Value::Bool(_) if *coerce => Err(vec!["Invalid date".to_string()]),
            other => Err(vec![mismatch("date", other)]),
        },
        FieldType::Number => match value {
            Value::Text(text) => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() && !text.trim().is_empty() => {
                    Ok(Some(FieldValue::Number(number)))
                }
                _ => Err(vec!["Expected number, received nan".to_string()]),
            },
            other => Err(vec![mismatch("number", other)]),
        },
        FieldType::Optional(_) => unreachable!("optional handled above"),
    }
}

fn mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {expected}, received {}", received.type_name())
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, Issue};
    use crate::core::date::Date;
    use crate::core::path::IssuePath;
    use crate::core::value::Value;
    use crate::schema::model::{FieldSchema, Schema};
    use std::collections::HashMap;

    fn values(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn post_schema() -> Schema {
        Schema::builder()
            .field(
                "title",
                FieldSchema::text().required_message("Title is required"),
            )
            .field("publishDate", FieldSchema::date())
            .field("topic", FieldSchema::enumeration(["NFL", "NBA"]))
            .field("featured", FieldSchema::boolean().optional())
            .build()
    }

    #[test]
    fn missing_required_field_uses_custom_message() {
        let issues = post_schema()
            .safe_parse(&values(&[
                ("publishDate", "2030-01-01".into()),
                ("topic", "NFL".into()),
            ]))
            .expect_err("title missing");
        assert_eq!(issues, vec![Issue::at("title", "Title is required")]);
    }

    #[test]
    fn coerces_date_and_strips_unknown_keys() {
        let data = post_schema()
            .safe_parse(&values(&[
                ("title", "Hi".into()),
                ("publishDate", "2030-01-01".into()),
                ("topic", "NBA".into()),
                ("extra", "ignored".into()),
            ]))
            .expect("valid");
        assert_eq!(
            data.get("publishDate"),
            Some(&FieldValue::Date(Date::new(2030, 1, 1)))
        );
        assert!(data.get("extra").is_none());
        assert!(data.get("featured").is_none());
        let keys: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(keys, vec!["title", "publishDate", "topic"]);
    }

    #[test]
    fn reports_enum_and_type_mismatches() {
        let issues = post_schema()
            .safe_parse(&values(&[
                ("title", Value::Bool(true)),
                ("publishDate", "tomorrow".into()),
                ("topic", "NHL".into()),
                ("featured", "yes".into()),
            ]))
            .expect_err("invalid");
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Expected string, received boolean",
                "Invalid date",
                "Invalid enum value. Expected 'NFL' | 'NBA', received 'NHL'",
                "Expected boolean, received string",
            ]
        );
    }

    #[test]
    fn empty_string_is_a_valid_string() {
        let schema = Schema::builder().field("note", FieldSchema::text()).build();
        assert!(schema.safe_parse(&values(&[("note", "".into())])).is_ok());
    }

    #[test]
    fn strict_date_rejects_text() {
        let schema = Schema::builder()
            .field("due", FieldSchema::strict_date())
            .build();
        let issues = schema
            .safe_parse(&values(&[("due", "2030-01-01".into())]))
            .expect_err("strict");
        assert_eq!(issues[0].message, "Expected date, received string");
    }

    #[test]
    fn number_parses_text() {
        let schema = Schema::builder().field("count", FieldSchema::number()).build();
        let data = schema
            .safe_parse(&values(&[("count", " 42 ".into())]))
            .expect("number");
        assert_eq!(data.get("count").and_then(FieldValue::as_number), Some(42.0));
        assert!(schema.safe_parse(&values(&[("count", "".into())])).is_err());
    }

    #[test]
    fn refinements_run_after_fields_pass() {
        let schema = Schema::builder()
            .field("a", FieldSchema::text())
            .field("b", FieldSchema::text())
            .refine(|data| {
                if data.get("a") == data.get("b") {
                    vec![Issue::new(IssuePath::key("b").push_index(0), "must differ")]
                } else {
                    Vec::new()
                }
            })
            .build();

        let issues = schema
            .safe_parse(&values(&[("a", "x".into()), ("b", "x".into())]))
            .expect_err("refined");
        assert_eq!(issues[0].path.first_key(), Some("b"));

        let missing = schema
            .safe_parse(&values(&[("a", "x".into())]))
            .expect_err("b missing");
        assert_eq!(missing, vec![Issue::at("b", "Required")]);
    }

    #[test]
    fn validated_data_serializes_to_ordered_json() {
        let data = post_schema()
            .safe_parse(&values(&[
                ("featured", Value::Bool(true)),
                ("topic", "NFL".into()),
                ("publishDate", "2031-12-24".into()),
                ("title", "T".into()),
            ]))
            .expect("valid");
        let json = serde_json::to_string(&data).expect("json");
        assert_eq!(
            json,
            r#"{"title":"T","publishDate":"2031-12-24","topic":"NFL","featured":true}"#
        );
    }
}
