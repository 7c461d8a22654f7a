use crate::core::value::{FieldInput, Value};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Single choice from a fixed list. Left/Right cycle and commit immediately.
pub struct SelectInput {
    base: InputBase,
    options: Vec<String>,
    placeholder: Option<String>,
}

impl SelectInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            options,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn position_of(&self, current: Option<&Value>) -> Option<usize> {
        let text = current.and_then(Value::as_text)?;
        self.options.iter().position(|option| option == text)
    }

    fn step(&self, current: Option<&Value>, forward: bool) -> Option<&str> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len();
        let next = match (self.position_of(current), forward) {
            (Some(pos), true) => (pos + 1) % len,
            (Some(pos), false) => (pos + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.options.get(next).map(String::as_str)
    }
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let mut line = vec![Span::new("  ")];
        match self.position_of(ctx.value) {
            Some(pos) => {
                let style = if ctx.focused {
                    ctx.theme.focused
                } else {
                    ctx.theme.selected
                };
                line.push(Span::styled(format!("‹ {} ›", self.options[pos]), style));
                if ctx.focused {
                    line.push(Span::styled(
                        format!("  {}/{}", pos + 1, self.options.len()),
                        ctx.theme.hint,
                    ));
                }
            }
            None => {
                let placeholder = self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER);
                line.push(Span::styled(format!("‹ {placeholder} ›"), ctx.theme.placeholder));
            }
        }
        DrawOutput::line(line)
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent, current: Option<&Value>) -> InteractionResult {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => true,
            KeyCode::Left => false,
            KeyCode::Enter => return InteractionResult::input_done(),
            _ => return InteractionResult::ignored(),
        };
        match self.step(current, forward) {
            Some(choice) => InteractionResult::changed(FieldInput::Text(choice.to_string())),
            None => InteractionResult::handled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::Date;
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use crate::widgets::traits::WidgetAction;

    fn select() -> SelectInput {
        SelectInput::new(
            "topic",
            "Topic",
            vec!["NFL".to_string(), "NBA".to_string(), "MLB".to_string()],
        )
    }

    fn chosen(result: InteractionResult) -> String {
        match result.actions.as_slice() {
            [WidgetAction::Changed(FieldInput::Text(text))] => text.clone(),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn right_from_unset_picks_first() {
        let mut input = select();
        assert_eq!(chosen(input.on_key(KeyEvent::plain(KeyCode::Right), None)), "NFL");
    }

    #[test]
    fn left_from_unset_picks_last() {
        let mut input = select();
        assert_eq!(chosen(input.on_key(KeyEvent::plain(KeyCode::Left), None)), "MLB");
    }

    #[test]
    fn cycling_wraps_around() {
        let mut input = select();
        let current = Value::from("MLB");
        assert_eq!(
            chosen(input.on_key(KeyEvent::plain(KeyCode::Right), Some(&current))),
            "NFL"
        );
    }

    #[test]
    fn unset_shows_placeholder() {
        let input = select().with_placeholder("Pick a league");
        let theme = Theme::default();
        let ctx = RenderContext {
            focused: false,
            value: None,
            today: Date::new(2026, 1, 1),
            theme: &theme,
        };
        assert_eq!(line_text(&input.draw(&ctx).lines[0]), "  ‹ Pick a league ›");
    }

    #[test]
    fn empty_choice_list_changes_nothing() {
        let mut input = SelectInput::new("topic", "Topic", Vec::new());
        let result = input.on_key(KeyEvent::plain(KeyCode::Right), None);
        assert!(result.handled);
        assert!(result.actions.is_empty());
    }
}
