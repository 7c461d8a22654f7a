use crate::core::value::{FieldInput, Value};
use crate::form::derive::{self, Derivation};
use crate::form::state::{ErrorPolicy, ErrorState, FormState};
use crate::schema::{FieldDescriptor, InputTransform, Schema, ValidatedData};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub type SubmitHandler = Box<dyn FnMut(ValidatedData) + Send>;

/// `Validating` is only ever observed inside [`FormController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Validating,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Invalid { errors: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { field: String, value: Value },
    Derived { field: String, value: Value },
    InputIgnored { field: String },
}

pub struct FormController {
    schema: Schema,
    descriptors: Vec<FieldDescriptor>,
    transforms: HashMap<String, InputTransform>,
    derivations: Vec<Derivation>,
    state: FormState,
    errors: ErrorState,
    status: FormStatus,
    policy: ErrorPolicy,
    on_submit: SubmitHandler,
    submissions: usize,
}

impl FormController {
    pub fn new<F>(schema: Schema, on_submit: F) -> Self
    where
        F: FnMut(ValidatedData) + Send + 'static,
    {
        let descriptors = schema.describe();
        let transforms = schema
            .fields()
            .filter(|(_, field)| field.input != InputTransform::None)
            .map(|(name, field)| (name.to_string(), field.input))
            .collect();
        let derivations = derive::from_schema(&schema);

        Self {
            schema,
            descriptors,
            transforms,
            derivations,
            state: FormState::new(),
            errors: ErrorState::default(),
            status: FormStatus::Editing,
            policy: ErrorPolicy::default(),
            on_submit: Box::new(on_submit),
            submissions: 0,
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_error_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub fn with_derivation(mut self, derivation: Derivation) -> Self {
        self.derivations.push(derivation);
        self
    }

    pub fn with_input_transform(
        mut self,
        field: impl Into<String>,
        transform: InputTransform,
    ) -> Self {
        self.transforms.insert(field.into(), transform);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.state.get(name)
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn submissions(&self) -> usize {
        self.submissions
    }

    pub fn input_transform(&self, name: &str) -> InputTransform {
        self.transforms.get(name).copied().unwrap_or_default()
    }

    /// Applies one user edit to one field, then any derivations it triggers.
    pub fn apply(&mut self, name: &str, input: FieldInput) -> Vec<FormEvent> {
        if self.descriptor(name).is_none() {
            warn!(field = name, "ignoring input for undeclared field");
            return vec![FormEvent::InputIgnored {
                field: name.to_string(),
            }];
        }

        let value = match input.normalize() {
            Value::Text(text) => Value::Text(self.input_transform(name).apply(text)),
            other => other,
        };
        debug!(field = name, value = ?value, "field changed");
        self.state.set(name, value.clone());

        let mut events = vec![FormEvent::ValueChanged {
            field: name.to_string(),
            value: value.clone(),
        }];

        for derivation in self.derivations.iter().filter(|d| d.is_triggered_by(name)) {
            let Some(derived) = derivation.derive(&value) else {
                continue;
            };
            debug!(
                source = name,
                target = derivation.target.as_str(),
                value = ?derived,
                "derived field"
            );
            self.state.set(derivation.target.clone(), derived.clone());
            events.push(FormEvent::Derived {
                field: derivation.target.clone(),
                value: derived,
            });
        }

        events
    }

    /// Validates the whole form. On success the handler receives the
    /// validated data and the form is cleared.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.status = FormStatus::Validating;

        match self.schema.safe_parse(&self.state) {
            Ok(data) => {
                self.errors = ErrorState::default();
                self.status = FormStatus::Editing;
                info!(fields = data.len(), "form submitted");
                (self.on_submit)(data);
                self.submissions += 1;
                self.state.clear();
                SubmitOutcome::Submitted
            }
            Err(issues) => {
                let descriptors = &self.descriptors;
                self.errors = ErrorState::from_issues(
                    &issues,
                    |key| descriptors.iter().any(|d| d.name == key),
                    self.policy,
                );
                self.status = FormStatus::Invalid;
                warn!(
                    issues = issues.len(),
                    fields = self.errors.len(),
                    "form submission rejected"
                );
                SubmitOutcome::Invalid {
                    errors: self.errors.len(),
                }
            }
        }
    }

    /// Drops all values and messages.
    pub fn reset(&mut self) {
        self.state.clear();
        self.errors = ErrorState::default();
        self.status = FormStatus::Editing;
    }
}
