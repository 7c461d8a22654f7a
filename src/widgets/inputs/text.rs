use crate::core::value::{FieldInput, Value};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext,
};
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";

/// Single-line text input. The text itself lives in form state; the widget
/// only remembers where the cursor is.
pub struct TextInput {
    base: InputBase,
    /// `None` parks the cursor at the end of whatever the current text is.
    cursor: Option<usize>,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            cursor: None,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn cursor_in(&self, text: &str) -> usize {
        match self.cursor {
            Some(cursor) => text_edit::clamp_cursor(cursor, text),
            None => text_edit::char_count(text),
        }
    }

    fn edit(
        &mut self,
        current: Option<&Value>,
        op: impl FnOnce(&mut String, &mut usize) -> bool,
    ) -> InteractionResult {
        let mut text = current_text(current).to_string();
        let mut cursor = self.cursor_in(&text);
        if !op(&mut text, &mut cursor) {
            return InteractionResult::handled();
        }
        self.cursor = Some(cursor);
        InteractionResult::changed(FieldInput::Text(text))
    }

    fn move_to(&mut self, current: Option<&Value>, op: impl FnOnce(&mut usize, &str) -> bool) {
        let text = current_text(current);
        let mut cursor = self.cursor_in(text);
        op(&mut cursor, text);
        self.cursor = Some(cursor);
    }
}

fn current_text(current: Option<&Value>) -> &str {
    current.and_then(Value::as_text).unwrap_or("")
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let text = current_text(ctx.value);
        let mut line = vec![Span::new(INDENT)];

        if text.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                line.push(Span::styled(placeholder.clone(), ctx.theme.placeholder));
            }
        } else {
            line.push(Span::new(text));
        }

        let cursor = ctx.focused.then(|| {
            let before = text_edit::prefix(text, self.cursor_in(text));
            CursorPos {
                row: 0,
                col: (INDENT.len() + UnicodeWidthStr::width(before)) as u16,
            }
        });

        DrawOutput {
            lines: vec![line],
            cursor,
        }
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent, current: Option<&Value>) -> InteractionResult {
        if key.is_ctrl('w') {
            return self.edit(current, text_edit::delete_word_left);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return InteractionResult::ignored();
        }

        match key.code {
            KeyCode::Char(ch) => self.edit(current, |text, cursor| {
                text_edit::insert_char(text, cursor, ch);
                true
            }),
            KeyCode::Backspace => self.edit(current, text_edit::backspace_char),
            KeyCode::Delete => self.edit(current, text_edit::delete_char),
            KeyCode::Left => {
                self.move_to(current, text_edit::move_left);
                InteractionResult::handled()
            }
            KeyCode::Right => {
                self.move_to(current, text_edit::move_right);
                InteractionResult::handled()
            }
            KeyCode::Home => {
                self.cursor = Some(0);
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = None;
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_blur(&mut self) {
        self.cursor = None;
    }
}
