use crate::core::value::{FieldInput, Value};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

/// Boolean switch. An unset field reads as `false`.
pub struct ToggleInput {
    base: InputBase,
    description: Option<String>,
}

impl ToggleInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn is_on(current: Option<&Value>) -> bool {
    current.and_then(Value::as_bool).unwrap_or(false)
}

impl Drawable for ToggleInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let (symbol, style) = if is_on(ctx.value) {
            ("[✓] on ", Style::new().color(Color::Green))
        } else {
            ("[ ] off", Style::new().color(Color::Red))
        };
        let mut line = vec![Span::new("  "), Span::styled(symbol, style)];
        if let Some(description) = &self.description {
            line.push(Span::styled(format!("  {description}"), ctx.theme.hint));
        }
        DrawOutput::line(line)
    }
}

impl Interactive for ToggleInput {
    fn on_key(&mut self, key: KeyEvent, current: Option<&Value>) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') => InteractionResult::changed(FieldInput::Bool(!is_on(current))),
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }
}
