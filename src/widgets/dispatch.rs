use crate::core::date::Date;
use crate::schema::introspect::{FieldDescriptor, FieldKind};
use crate::widgets::inputs::{DatePicker, SelectInput, TextInput, ToggleInput};
use crate::widgets::traits::FieldWidget;

/// Render strategy chosen for a field, one per `FieldKind` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Text,
    Toggle,
    Select,
    DatePicker,
    /// Plain text input prompting with the field label.
    Fallback,
}

impl WidgetKind {
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text,
            FieldKind::Boolean => Self::Toggle,
            FieldKind::Enumeration(_) => Self::Select,
            FieldKind::Date => Self::DatePicker,
            FieldKind::Unknown => Self::Fallback,
        }
    }
}

/// Builds the widget for one field. `today` pins the date picker's notion of
/// the current day; `None` reads the system clock.
pub fn build_widget(descriptor: &FieldDescriptor, today: Option<Date>) -> Box<dyn FieldWidget> {
    let name = descriptor.name.as_str();
    let label = descriptor.label.as_str();
    let placeholder = descriptor.placeholder.as_deref();

    match WidgetKind::for_kind(&descriptor.kind) {
        WidgetKind::Text => {
            let input = TextInput::new(name, label);
            Box::new(match placeholder {
                Some(placeholder) => input.with_placeholder(placeholder),
                None => input,
            })
        }
        WidgetKind::Toggle => {
            let toggle = ToggleInput::new(name, label);
            Box::new(match placeholder {
                Some(description) => toggle.with_description(description),
                None => toggle,
            })
        }
        WidgetKind::Select => {
            let choices = descriptor.choices().map(<[String]>::to_vec).unwrap_or_default();
            let select = SelectInput::new(name, label, choices);
            Box::new(match placeholder {
                Some(placeholder) => select.with_placeholder(placeholder),
                None => select,
            })
        }
        WidgetKind::DatePicker => {
            let picker = DatePicker::new(name, label);
            Box::new(match today {
                Some(today) => picker.with_today(today),
                None => picker,
            })
        }
        WidgetKind::Fallback => Box::new(TextInput::new(name, label).with_placeholder(label)),
    }
}

pub fn build_widgets(
    descriptors: &[FieldDescriptor],
    today: Option<Date>,
) -> Vec<Box<dyn FieldWidget>> {
    descriptors
        .iter()
        .map(|descriptor| build_widget(descriptor, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use crate::widgets::traits::RenderContext;

    fn descriptor(kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            name: "field".to_string(),
            label: "Views".to_string(),
            kind,
            placeholder: None,
            optional: false,
        }
    }

    #[test]
    fn every_kind_has_a_strategy() {
        assert_eq!(WidgetKind::for_kind(&FieldKind::Text), WidgetKind::Text);
        assert_eq!(WidgetKind::for_kind(&FieldKind::Boolean), WidgetKind::Toggle);
        assert_eq!(
            WidgetKind::for_kind(&FieldKind::Enumeration(vec!["a".into()])),
            WidgetKind::Select
        );
        assert_eq!(WidgetKind::for_kind(&FieldKind::Date), WidgetKind::DatePicker);
        assert_eq!(WidgetKind::for_kind(&FieldKind::Unknown), WidgetKind::Fallback);
    }

    #[test]
    fn fallback_prompts_with_label() {
        let widget = build_widget(&descriptor(FieldKind::Unknown), None);
        let theme = Theme::default();
        let ctx = RenderContext {
            focused: false,
            value: None,
            today: Date::new(2026, 1, 1),
            theme: &theme,
        };
        assert_eq!(widget.id(), "field");
        assert_eq!(line_text(&widget.draw(&ctx).lines[0]), "  Views");
    }

    #[test]
    fn select_widget_uses_descriptor_choices() {
        let mut widget = build_widget(&descriptor(FieldKind::Enumeration(vec![
            "NFL".into(),
            "NBA".into(),
        ])), None);
        let current = Value::from("NFL");
        let result = widget.on_key(KeyEvent::plain(KeyCode::Right), Some(&current));
        assert!(result.handled);
        assert_eq!(result.actions.len(), 1);
    }
}
