use crate::core::value::Value;
use crate::schema::{DeriveRule, Schema};

/// "When `source` changes, recompute `target` with `rule`."
#[derive(Debug, Clone)]
pub struct Derivation {
    pub source: String,
    pub target: String,
    pub rule: DeriveRule,
}

impl Derivation {
    pub fn new(source: impl Into<String>, target: impl Into<String>, rule: DeriveRule) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            rule,
        }
    }

    pub fn slug(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, DeriveRule::Slug)
    }

    pub fn is_triggered_by(&self, changed: &str) -> bool {
        self.source == changed
    }

    /// Derived value for a new source value. Non-text sources derive nothing.
    pub fn derive(&self, source: &Value) -> Option<Value> {
        source
            .as_text()
            .map(|text| Value::Text(self.rule.apply(text)))
    }
}

/// Derivations declared on the schema's fields, in field order.
pub fn from_schema(schema: &Schema) -> Vec<Derivation> {
    schema
        .fields()
        .filter_map(|(name, field)| {
            field
                .derive
                .as_ref()
                .map(|spec| Derivation::new(spec.from.clone(), name, spec.rule.clone()))
        })
        .collect()
}
